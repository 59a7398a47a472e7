//! Deterministic daily answer selection.
//!
//! Days are grouped into cycles as long as the answer list. Each cycle walks a
//! seeded shuffle of the list, so every answer is used exactly once before any
//! repeats, and the order changes from one cycle to the next.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::PuzzleConfig;

/// Answer list used when no custom list is supplied.
pub const DEFAULT_ANSWERS: [&str; 32] = [
    "FRIEND", "PLANET", "GARDEN", "BRIDGE", "PURPLE", "ORANGE", "CASTLE", "TEMPLE",
    "SHADOW", "WINTER", "SUMMER", "SPRING", "AUTUMN", "FOREST", "DESERT", "STREAM",
    "COFFEE", "BUTTER", "CHEESE", "COOKIE", "MARKET", "DOLLAR", "TRAVEL", "HEALTH",
    "BEAUTY", "SILVER", "GOLDEN", "BRONZE", "MARBLE", "FABRIC", "RIBBON", "BUTTON",
];

const CYCLE_MULTIPLIER: u64 = 2_654_435_761;
const CYCLE_OFFSET: u64 = 42_069;
const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWord {
    pub value: String,
    pub date_key: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("answer list is empty")]
    EmptyList,
    #[error("answer '{word}' has {actual} letters, expected {expected}")]
    WrongLength {
        word: String,
        expected: usize,
        actual: usize,
    },
    #[error("answer '{word}' contains non-letter characters")]
    NotAlphabetic { word: String },
}

/// Calendar date formatted the way progress is keyed everywhere (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone)]
pub struct WordScheduler {
    words: Vec<String>,
    epoch: NaiveDate,
    secret: u64,
}

impl WordScheduler {
    /// Build a schedule from an ordered answer list. Duplicates are dropped so
    /// the once-per-cycle guarantee holds for the remaining entries.
    pub fn new<I, S>(words: I, config: &PuzzleConfig) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ScheduleError::NotAlphabetic { word });
            }
            let actual = word.chars().count();
            if actual != config.word_length {
                return Err(ScheduleError::WrongLength {
                    word,
                    expected: config.word_length,
                    actual,
                });
            }
            if !list.contains(&word) {
                list.push(word);
            }
        }

        if list.is_empty() {
            return Err(ScheduleError::EmptyList);
        }

        tracing::debug!("Word schedule built with {} answers", list.len());
        Ok(Self {
            words: list,
            epoch: config.epoch,
            secret: config.schedule_secret,
        })
    }

    pub fn with_default_words(config: &PuzzleConfig) -> Self {
        Self {
            words: DEFAULT_ANSWERS.iter().map(|w| w.to_string()).collect(),
            epoch: config.epoch,
            secret: config.schedule_secret,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Days elapsed since the schedule epoch; negative before it.
    pub fn puzzle_number(&self, date: NaiveDate) -> i64 {
        (date - self.epoch).num_days()
    }

    pub fn word_for_date(&self, date: NaiveDate) -> TargetWord {
        let n = self.words.len() as i64;
        let days = self.puzzle_number(date);
        let cycle = days.div_euclid(n);
        let day_in_cycle = days.rem_euclid(n) as usize;

        let order = self.cycle_order(cycle);
        TargetWord {
            value: self.words[order[day_in_cycle]].clone(),
            date_key: date_key(date),
        }
    }

    /// Permutation of list indices used during `cycle`.
    pub fn cycle_order(&self, cycle: i64) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.words.len()).collect();
        let mut rng = Lcg::new(cycle_seed(cycle, self.secret));

        // Fisher-Yates, high to low
        for i in (1..order.len()).rev() {
            let j = (rng.next() % (i as u64 + 1)) as usize;
            order.swap(i, j);
        }
        order
    }
}

fn cycle_seed(cycle: i64, secret: u64) -> u64 {
    (cycle as u64)
        .wrapping_mul(CYCLE_MULTIPLIER)
        .wrapping_add(CYCLE_OFFSET)
        ^ secret
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        // low bits of a power-of-two LCG are weak
        self.state >> 33
    }
}

/// Time left until the next answer unlocks at local midnight. Display only.
pub fn time_until_next_word(now: NaiveDateTime) -> Duration {
    now.date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight - now)
        .unwrap_or_else(Duration::zero)
}

/// `HH:MM:SS` rendering of a countdown.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
