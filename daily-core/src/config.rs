use chrono::NaiveDate;
use daily_types::{MAX_GUESSES, WORD_LENGTH};

/// Whether a letter revealed as Present may be played again in the same spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardModeStrictness {
    /// Revealed letters must be reused; positions of Present letters are not checked.
    #[default]
    Standard,
    /// Additionally forbids a Present letter from returning to a position it was already tried in.
    Strict,
}

#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    pub word_length: usize,
    pub max_guesses: usize,
    pub strictness: HardModeStrictness,
    /// Day zero of the word schedule.
    pub epoch: NaiveDate,
    /// Mixed into every cycle seed so the schedule can't be derived from the word list alone.
    pub schedule_secret: u64,
}

impl PuzzleConfig {
    pub fn with_strictness(mut self, strictness: HardModeStrictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_schedule_secret(mut self, secret: u64) -> Self {
        self.schedule_secret = secret;
        self
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            word_length: WORD_LENGTH,
            max_guesses: MAX_GUESSES,
            strictness: HardModeStrictness::Standard,
            epoch: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            schedule_secret: 0,
        }
    }
}
