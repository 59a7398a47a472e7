use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of letters in every guess and answer.
pub const WORD_LENGTH: usize = 6;

/// Number of guesses a player gets per day.
pub const MAX_GUESSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LetterStatus {
    Correct, // letter in the right position
    Present, // letter in the word, wrong position
    Absent,  // letter not in the word (or all copies already accounted for)
}

/// One evaluated row of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessFeedback {
    pub word: String,
    pub letters: Vec<LetterStatus>,
}

impl GuessFeedback {
    pub fn is_solved(&self) -> bool {
        !self.letters.is_empty() && self.letters.iter().all(|s| *s == LetterStatus::Correct)
    }
}

/// Where a day's game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Progress for a single calendar day.
///
/// Field names on the wire match what the account server stores, so the same
/// value is written to the local store and pushed to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameState {
    #[serde(rename = "date")]
    pub date_key: String,
    pub guesses: Vec<String>,
    #[serde(rename = "gameOver")]
    pub is_over: bool,
    pub won: bool,
    #[serde(default)]
    pub hard_mode: bool,
    #[serde(default)]
    pub hard_mode_ever_disabled: bool,
}

impl GameState {
    pub fn new(date_key: impl Into<String>, hard_mode: bool) -> Self {
        Self {
            date_key: date_key.into(),
            guesses: Vec::new(),
            is_over: false,
            won: false,
            hard_mode,
            hard_mode_ever_disabled: false,
        }
    }

    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    pub fn phase(&self) -> GamePhase {
        match (self.is_over, self.won) {
            (true, true) => GamePhase::Won,
            (true, false) => GamePhase::Lost,
            (false, _) if self.guesses.is_empty() => GamePhase::NotStarted,
            (false, _) => GamePhase::InProgress,
        }
    }

    /// Hard mode counts for stats only if it was on for the whole game.
    pub fn played_in_hard_mode(&self) -> bool {
        self.hard_mode && !self.hard_mode_ever_disabled
    }
}

/// The record reported once a game finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameOutcome {
    pub date: String,
    pub won: bool,
    pub guesses: Option<u32>, // None on a loss
    pub hard_mode: bool,
}

impl GameOutcome {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            date: state.date_key.clone(),
            won: state.won,
            guesses: state.won.then(|| state.guesses.len() as u32),
            hard_mode: state.played_in_hard_mode(),
        }
    }
}
