#![allow(dead_code)]

use chrono::NaiveDate;
use daily_core::{
    GameEvent, GameEventHandler, GameSession, LocalWordList, ProgressStore, PuzzleConfig,
    WordScheduler,
};
use std::sync::{Arc, Mutex};

pub const ANSWER: &str = "SILVER";

/// Guesses that never match the answer, enough to lose a game
pub const MISSES: [&str; 6] = ["FOREST", "GARDEN", "DESERT", "STREAM", "SPRING", "BUTTON"];

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

/// A schedule whose answer is the same every day
pub fn create_test_scheduler(config: &PuzzleConfig) -> WordScheduler {
    WordScheduler::new([ANSWER], config).unwrap()
}

pub fn create_test_word_list() -> LocalWordList {
    let words = "strike\nshined\nspider\nsiever\nskiver\nsirven\nforest\ngarden\ndesert\nstream\nspring\nbutton\nsilver";
    LocalWordList::new(words, 6)
}

pub fn create_session(store: &ProgressStore, today: NaiveDate) -> GameSession {
    let config = PuzzleConfig::default();
    GameSession::load(store.clone(), create_test_scheduler(&config), config, today)
}

pub async fn play(session: &mut GameSession, words: &[&str]) {
    let list = create_test_word_list();
    for word in words {
        session.submit_guess(word, &list).await.unwrap();
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
