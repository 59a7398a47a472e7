use thiserror::Error;

use crate::HardModeViolation;

/// Why a submitted guess was not admitted. A rejected guess never consumes
/// one of the day's attempts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("not enough letters")]
    NotEnoughLetters { expected: usize, actual: usize },
    #[error("too many letters")]
    TooManyLetters { expected: usize, actual: usize },
    #[error("guess may only contain the letters A to Z")]
    InvalidCharacters,
    #[error("not in word list")]
    NotAWord,
    #[error(transparent)]
    HardMode(#[from] HardModeViolation),
    #[error("today's game is already over")]
    GameOver,
    #[error("a guess is already being checked")]
    SubmissionPending,
    #[error("the puzzle changed while the guess was being checked")]
    DayChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardModeToggleError {
    #[error("hard mode can only be turned on before the first guess")]
    AlreadyStarted,
    #[error("hard mode was turned off during today's game")]
    LockedForToday,
    #[error("today's game is already over")]
    GameOver,
}
