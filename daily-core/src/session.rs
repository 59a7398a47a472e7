//! The per-day game: key input, guess admission and the
//! `NotStarted -> InProgress -> Won | Lost` lifecycle.
//!
//! Every mutation is written through to the [`ProgressStore`] before the
//! matching [`GameEvent`] is published, so a handler that reads the store
//! always sees the new state.

use chrono::NaiveDate;
use daily_types::{GameOutcome, GamePhase, GameState, GuessFeedback, Stats};

use crate::scheduler::date_key;
use crate::{
    GameEvent, GameEventBus, GameEventHandler, GuessEvaluator, GuessRejection,
    HardModeToggleError, HardModeValidator, ProgressSource, ProgressStore, PuzzleConfig,
    StateReconciler, StatsAggregator, TargetWord, WordScheduler, WordValidityProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Backspace,
    Enter,
}

/// A guess that passed the synchronous checks and is waiting on a word
/// lookup. Only one can be outstanding per session.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingGuess {
    id: u64,
    word: String,
    date_key: String,
}

impl PendingGuess {
    pub fn word(&self) -> &str {
        &self.word
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedGuess {
    pub feedback: GuessFeedback,
    pub phase: GamePhase,
    /// Present only on the guess that ended the game.
    pub outcome: Option<GameOutcome>,
}

pub struct GameSession {
    config: PuzzleConfig,
    scheduler: WordScheduler,
    store: ProgressStore,
    today: NaiveDate,
    target: TargetWord,
    state: GameState,
    stats: Stats,
    current_guess: String,
    /// Id of the outstanding submission, if any.
    pending: Option<u64>,
    next_submission: u64,
    events: GameEventBus,
}

impl GameSession {
    /// Restore today's game from `store`, starting a fresh one when nothing
    /// usable is stored for `today`. Stats are loaded as-is.
    pub fn load(
        store: ProgressStore,
        scheduler: WordScheduler,
        config: PuzzleConfig,
        today: NaiveDate,
    ) -> Self {
        let stats = store.load_stats(config.max_guesses);
        let target = scheduler.word_for_date(today);

        let mut session = Self {
            state: GameState::new(target.date_key.clone(), false),
            config,
            scheduler,
            store,
            today,
            target,
            stats,
            current_guess: String::new(),
            pending: None,
            next_submission: 0,
            events: GameEventBus::new(),
        };

        match session.store.load_game() {
            Some(stored) if stored.date_key != session.target.date_key => {
                tracing::info!(
                    "Stored progress is for {}, starting {}",
                    stored.date_key,
                    session.target.date_key
                );
                session.start_fresh_day();
            }
            Some(stored) if !session.is_consistent(&stored) => {
                tracing::warn!(
                    "Stored progress for {} is inconsistent, starting over",
                    stored.date_key
                );
                session.start_fresh_day();
            }
            Some(stored) => {
                tracing::debug!(
                    "Restored {} guesses for {}",
                    stored.guesses.len(),
                    stored.date_key
                );
                session.state = stored;
            }
            None => session.start_fresh_day(),
        }

        session
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.events.add_handler(handler);
    }

    /// Switch to the new day's puzzle if the calendar moved on. Returns whether
    /// a new game was started.
    pub fn ensure_current_day(&mut self, today: NaiveDate) -> bool {
        if date_key(today) == self.state.date_key {
            return false;
        }

        tracing::info!("Day changed from {} to {}", self.state.date_key, date_key(today));
        self.today = today;
        self.target = self.scheduler.word_for_date(today);
        self.start_fresh_day();
        true
    }

    fn start_fresh_day(&mut self) {
        let hard_mode = self.store.hard_mode_preference();
        self.state = GameState::new(self.target.date_key.clone(), hard_mode);
        self.current_guess.clear();
        self.pending = None;
        self.persist_state();
        self.events.publish(GameEvent::GameStarted {
            state: self.state.clone(),
        });
    }

    /// Replays a stored game against today's answer to make sure it could
    /// actually have happened.
    fn is_consistent(&self, state: &GameState) -> bool {
        let max = self.config.max_guesses;
        if state.guesses.len() > max {
            return false;
        }
        if state
            .guesses
            .iter()
            .any(|g| g.chars().count() != self.config.word_length)
        {
            return false;
        }

        let solved_at = state
            .guesses
            .iter()
            .position(|g| g.eq_ignore_ascii_case(&self.target.value));
        match (state.is_over, state.won, solved_at) {
            (true, true, Some(i)) => i + 1 == state.guesses.len(),
            (true, false, None) => state.guesses.len() == max,
            (false, false, None) => state.guesses.len() < max,
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyInput) -> Result<Option<PendingGuess>, GuessRejection> {
        match key {
            KeyInput::Letter(letter) => {
                if !self.state.is_over
                    && letter.is_ascii_alphabetic()
                    && self.current_guess.chars().count() < self.config.word_length
                {
                    self.current_guess.push(letter.to_ascii_uppercase());
                }
                Ok(None)
            }
            KeyInput::Backspace => {
                if !self.state.is_over {
                    self.current_guess.pop();
                }
                Ok(None)
            }
            KeyInput::Enter => {
                let word = self.current_guess.clone();
                self.begin_submission(&word).map(Some)
            }
        }
    }

    /// Run the checks that need no lookup and mark a submission as pending.
    pub fn begin_submission(&mut self, word: &str) -> Result<PendingGuess, GuessRejection> {
        if self.state.is_over {
            return Err(GuessRejection::GameOver);
        }
        if self.pending.is_some() {
            return Err(GuessRejection::SubmissionPending);
        }

        let word = word.trim().to_uppercase();
        let expected = self.config.word_length;
        let actual = word.chars().count();
        if actual < expected {
            return Err(GuessRejection::NotEnoughLetters { expected, actual });
        }
        if actual > expected {
            return Err(GuessRejection::TooManyLetters { expected, actual });
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GuessRejection::InvalidCharacters);
        }

        let id = self.next_submission;
        self.next_submission += 1;
        self.pending = Some(id);
        Ok(PendingGuess {
            id,
            word,
            date_key: self.state.date_key.clone(),
        })
    }

    /// Finish a submission once the word lookup has answered.
    ///
    /// A submission from before a day rollover is rejected with `DayChanged`
    /// and leaves any newer submission outstanding.
    pub fn complete_submission(
        &mut self,
        pending: PendingGuess,
        is_valid_word: bool,
    ) -> Result<AcceptedGuess, GuessRejection> {
        if self.pending != Some(pending.id) {
            return Err(GuessRejection::DayChanged);
        }
        self.pending = None;

        if pending.date_key != self.state.date_key {
            return Err(GuessRejection::DayChanged);
        }

        if self.state.is_over {
            return Err(GuessRejection::GameOver);
        }
        if !is_valid_word {
            return Err(GuessRejection::NotAWord);
        }
        if self.state.hard_mode {
            HardModeValidator::validate(
                &pending.word,
                &self.state.guesses,
                &self.target.value,
                self.config.strictness,
            )?;
        }

        Ok(self.admit(pending.word))
    }

    /// Drop a pending submission without judging it, e.g. when the lookup
    /// was abandoned.
    pub fn cancel_submission(&mut self, pending: PendingGuess) {
        if self.pending == Some(pending.id) {
            self.pending = None;
        }
    }

    pub async fn submit_guess(
        &mut self,
        word: &str,
        provider: &dyn WordValidityProvider,
    ) -> Result<AcceptedGuess, GuessRejection> {
        let pending = self.begin_submission(word)?;
        let is_valid = provider.is_valid_word(pending.word()).await;
        self.complete_submission(pending, is_valid)
    }

    fn admit(&mut self, word: String) -> AcceptedGuess {
        let feedback = GuessEvaluator::feedback(&word, &self.target.value);
        self.state.guesses.push(word);
        self.current_guess.clear();

        if feedback.is_solved() {
            self.state.is_over = true;
            self.state.won = true;
        } else if self.state.guesses.len() >= self.config.max_guesses {
            self.state.is_over = true;
            self.state.won = false;
        }

        self.persist_state();
        self.events.publish(GameEvent::GuessAccepted {
            state: self.state.clone(),
            feedback: feedback.clone(),
        });

        let outcome = self.state.is_over.then(|| self.finish_game());
        AcceptedGuess {
            feedback,
            phase: self.state.phase(),
            outcome,
        }
    }

    fn finish_game(&mut self) -> GameOutcome {
        let outcome = GameOutcome::from_state(&self.state);
        let guess_count = self.state.won.then_some(self.state.guesses.len());

        self.stats = StatsAggregator::record_completed_game(
            &self.stats,
            self.today,
            self.state.won,
            guess_count,
            outcome.hard_mode,
        );
        if let Err(e) = self.store.save_stats(&self.stats) {
            tracing::error!("Failed to save stats: {}", e);
        }

        tracing::info!(
            "Game for {} finished: won={} in {} guesses",
            self.state.date_key,
            self.state.won,
            self.state.guesses.len()
        );
        self.events.publish(GameEvent::GameCompleted {
            state: self.state.clone(),
            outcome: outcome.clone(),
            stats: self.stats.clone(),
        });
        outcome
    }

    /// Apply the hard-mode toggle. The preference is remembered for future days
    /// even when today's game can't change.
    pub fn set_hard_mode(&mut self, enabled: bool) -> Result<(), HardModeToggleError> {
        self.remember_hard_mode_preference(enabled);

        if enabled == self.state.hard_mode {
            return Ok(());
        }
        if self.state.is_over {
            return Err(HardModeToggleError::GameOver);
        }

        if enabled {
            if self.state.hard_mode_ever_disabled {
                return Err(HardModeToggleError::LockedForToday);
            }
            if !self.state.guesses.is_empty() {
                return Err(HardModeToggleError::AlreadyStarted);
            }
        } else if !self.state.guesses.is_empty() {
            self.state.hard_mode_ever_disabled = true;
        }

        self.state.hard_mode = enabled;
        self.persist_state();
        self.events.publish(GameEvent::HardModeChanged {
            state: self.state.clone(),
            enabled,
        });
        Ok(())
    }

    fn remember_hard_mode_preference(&mut self, enabled: bool) {
        if let Err(e) = self.store.set_hard_mode_preference(enabled) {
            tracing::warn!("Failed to save hard mode preference: {}", e);
        }
        if self.stats.hard_mode == enabled {
            return;
        }

        self.stats.hard_mode = enabled;
        if let Err(e) = self.store.save_stats(&self.stats) {
            tracing::error!("Failed to save stats: {}", e);
        }
        self.events.publish(GameEvent::HardModePreferenceChanged {
            stats: self.stats.clone(),
        });
    }

    /// Merge server progress into the session. Must run before any input.
    pub fn apply_reconciliation(&mut self, remote: Option<GameState>) -> ProgressSource {
        if let Some(remote) = &remote {
            if remote.date_key == self.state.date_key && !self.is_consistent(remote) {
                tracing::warn!("Ignoring inconsistent server progress for {}", remote.date_key);
                return ProgressSource::Local;
            }
        }

        let reconciliation = StateReconciler::reconcile(self.state.clone(), remote);
        if reconciliation.source == ProgressSource::Remote {
            self.state = reconciliation.state;
            self.current_guess.clear();
            self.persist_state();
            self.events.publish(GameEvent::ProgressRestored {
                state: self.state.clone(),
                source: ProgressSource::Remote,
            });
        }
        reconciliation.source
    }

    /// Replace local stats with the server's copy. The account's hard mode
    /// preference comes along and seeds future days.
    pub fn adopt_remote_stats(&mut self, stats: Stats) {
        if let Err(e) = self.store.set_hard_mode_preference(stats.hard_mode) {
            tracing::warn!("Failed to save hard mode preference: {}", e);
        }
        if stats == self.stats {
            return;
        }
        self.stats = stats;
        if let Err(e) = self.store.save_stats(&self.stats) {
            tracing::error!("Failed to save stats: {}", e);
        }
        self.events.publish(GameEvent::StatsReplaced {
            stats: self.stats.clone(),
        });
    }

    pub fn reveal_word(&self) -> Option<&str> {
        self.state.is_over.then_some(self.target.value.as_str())
    }

    /// Feedback for every guess so far, for redrawing a restored board.
    pub fn board(&self) -> Vec<GuessFeedback> {
        self.state
            .guesses
            .iter()
            .map(|g| GuessEvaluator::feedback(g, &self.target.value))
            .collect()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.is_over.then(|| GameOutcome::from_state(&self.state))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining_guesses(&self) -> usize {
        self.config
            .max_guesses
            .saturating_sub(self.state.guesses.len())
    }

    pub fn date_key(&self) -> &str {
        &self.state.date_key
    }

    fn persist_state(&self) {
        if let Err(e) = self.store.save_game(&self.state) {
            tracing::error!("Failed to save progress for {}: {}", self.state.date_key, e);
        }
    }
}
