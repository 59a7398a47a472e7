//! Hard mode: every guess must keep using what earlier guesses revealed.

use std::collections::{BTreeMap, BTreeSet};

use daily_types::LetterStatus;
use thiserror::Error;

use crate::{GuessEvaluator, HardModeStrictness};

/// The first rule a candidate guess breaks. Positions are reported 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardModeViolation {
    #[error("letter {position} must be {letter}")]
    MissingPositionalLetter { position: usize, letter: char },
    #[error("{letter} can't be at position {position}")]
    ReusedExcludedPosition { position: usize, letter: char },
    #[error("guess must contain {letter}")]
    MissingRequiredLetter { letter: char },
    #[error("{letter} is not in the word")]
    UsedAbsentLetter { letter: char },
}

/// Everything earlier guesses revealed, folded together. Recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardModeConstraintSet {
    pub required_positions: BTreeMap<usize, char>,
    pub required_letters: BTreeSet<char>,
    pub excluded_positions: BTreeMap<usize, BTreeSet<char>>,
    pub absent_letters: BTreeSet<char>,
}

impl HardModeConstraintSet {
    /// Fold the feedback of each prior guess against `target`.
    pub fn from_history<S: AsRef<str>>(history: &[S], target: &str) -> Self {
        let mut constraints = Self::default();
        for guess in history {
            let guess = guess.as_ref().to_ascii_uppercase();
            let statuses = GuessEvaluator::evaluate(&guess, target);
            constraints.absorb(&guess, &statuses);
        }

        // A letter proven present anywhere is never absent overall
        let required = constraints.required_letters.clone();
        constraints.absent_letters.retain(|c| !required.contains(c));
        constraints
    }

    fn absorb(&mut self, guess: &str, statuses: &[LetterStatus]) {
        let letters: Vec<char> = guess.chars().collect();

        // Revealed letters first, so a duplicate marked Absent in the same
        // guess can't shadow a copy marked Correct or Present later on.
        for (position, (&letter, status)) in letters.iter().zip(statuses).enumerate() {
            match status {
                LetterStatus::Correct => {
                    self.required_positions.insert(position, letter);
                    self.required_letters.insert(letter);
                }
                LetterStatus::Present => {
                    self.required_letters.insert(letter);
                    self.excluded_positions
                        .entry(position)
                        .or_default()
                        .insert(letter);
                }
                LetterStatus::Absent => {}
            }
        }

        for (&letter, status) in letters.iter().zip(statuses) {
            if *status == LetterStatus::Absent && !self.required_letters.contains(&letter) {
                self.absent_letters.insert(letter);
            }
        }
    }

    /// Check a candidate in fixed order: positions, excluded positions,
    /// required letters, absent letters.
    pub fn check(
        &self,
        candidate: &str,
        strictness: HardModeStrictness,
    ) -> Result<(), HardModeViolation> {
        let letters: Vec<char> = candidate.chars().map(|c| c.to_ascii_uppercase()).collect();

        for (&position, &letter) in &self.required_positions {
            if letters.get(position) != Some(&letter) {
                return Err(HardModeViolation::MissingPositionalLetter {
                    position: position + 1,
                    letter,
                });
            }
        }

        if strictness == HardModeStrictness::Strict {
            for (&position, excluded) in &self.excluded_positions {
                if let Some(letter) = letters.get(position) {
                    if excluded.contains(letter) {
                        return Err(HardModeViolation::ReusedExcludedPosition {
                            position: position + 1,
                            letter: *letter,
                        });
                    }
                }
            }
        }

        for &letter in &self.required_letters {
            if !letters.contains(&letter) {
                return Err(HardModeViolation::MissingRequiredLetter { letter });
            }
        }

        if let Some(&letter) = letters.iter().find(|c| self.absent_letters.contains(c)) {
            return Err(HardModeViolation::UsedAbsentLetter { letter });
        }

        Ok(())
    }
}

pub struct HardModeValidator;

impl HardModeValidator {
    pub fn validate<S: AsRef<str>>(
        candidate: &str,
        history: &[S],
        target: &str,
        strictness: HardModeStrictness,
    ) -> Result<(), HardModeViolation> {
        HardModeConstraintSet::from_history(history, target).check(candidate, strictness)
    }

    /// Replay a finished history as if hard mode had been on, returning the
    /// first guess (and its index) that would have been rejected.
    pub fn first_violation<S: AsRef<str>>(
        history: &[S],
        target: &str,
        strictness: HardModeStrictness,
    ) -> Option<(usize, HardModeViolation)> {
        (1..history.len()).find_map(|i| {
            Self::validate(history[i].as_ref(), &history[..i], target, strictness)
                .err()
                .map(|violation| (i, violation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "SILVER";

    #[test]
    fn test_constraints_from_strike() {
        // S T R I K E vs S I L V E R
        let constraints = HardModeConstraintSet::from_history(&["STRIKE"], TARGET);

        assert_eq!(constraints.required_positions.get(&0), Some(&'S'));
        assert_eq!(
            constraints.required_letters,
            ['S', 'R', 'I', 'E'].into_iter().collect::<BTreeSet<char>>()
        );
        assert_eq!(constraints.absent_letters, ['T', 'K'].into_iter().collect::<BTreeSet<char>>());
        assert!(constraints.excluded_positions[&2].contains(&'R'));
        assert!(constraints.excluded_positions[&3].contains(&'I'));
        assert!(constraints.excluded_positions[&5].contains(&'E'));
    }

    #[test]
    fn test_dropping_revealed_letter_is_rejected() {
        let result =
            HardModeValidator::validate("SHINED", &["STRIKE"], TARGET, HardModeStrictness::Standard);

        assert_eq!(
            result,
            Err(HardModeViolation::MissingRequiredLetter { letter: 'R' })
        );
        assert_eq!(result.unwrap_err().to_string(), "guess must contain R");
    }

    #[test]
    fn test_guess_keeping_constraints_is_accepted() {
        for strictness in [HardModeStrictness::Standard, HardModeStrictness::Strict] {
            assert_eq!(
                HardModeValidator::validate("SPIDER", &["STRIKE"], TARGET, strictness),
                Ok(())
            );
            assert_eq!(
                HardModeValidator::validate("SILVER", &["STRIKE"], TARGET, strictness),
                Ok(())
            );
        }
    }

    #[test]
    fn test_positional_rule_checked_first() {
        // Loses the S at position 1 and also uses absent T
        let result =
            HardModeValidator::validate("TRIBES", &["STRIKE"], TARGET, HardModeStrictness::Standard);
        assert_eq!(
            result,
            Err(HardModeViolation::MissingPositionalLetter {
                position: 1,
                letter: 'S'
            })
        );
    }

    #[test]
    fn test_excluded_position_only_in_strict_mode() {
        // R back at position 3, where STRIKE already showed it doesn't go
        let candidate = "SIRVEN";
        assert_eq!(
            HardModeValidator::validate(candidate, &["STRIKE"], TARGET, HardModeStrictness::Standard),
            Ok(())
        );
        assert_eq!(
            HardModeValidator::validate(candidate, &["STRIKE"], TARGET, HardModeStrictness::Strict),
            Err(HardModeViolation::ReusedExcludedPosition {
                position: 3,
                letter: 'R'
            })
        );
    }

    #[test]
    fn test_absent_letter_rejected() {
        let result =
            HardModeValidator::validate("SIEVER", &["STRIKE"], TARGET, HardModeStrictness::Standard);
        assert_eq!(result, Ok(()));

        let result =
            HardModeValidator::validate("SKIVER", &["STRIKE"], TARGET, HardModeStrictness::Standard);
        assert_eq!(result, Err(HardModeViolation::UsedAbsentLetter { letter: 'K' }));
    }

    #[test]
    fn test_duplicate_absent_does_not_ban_required_letter() {
        // Target has one E (last); the leading E of the guess comes back Absent
        let constraints = HardModeConstraintSet::from_history(&["EXXXXE"], "ABCDFE");

        assert!(constraints.required_letters.contains(&'E'));
        assert!(!constraints.absent_letters.contains(&'E'));
        assert_eq!(
            constraints.check("ABCDFE", HardModeStrictness::Standard),
            Ok(())
        );
    }

    #[test]
    fn test_constraints_accumulate_across_guesses() {
        let history = ["STRIKE", "SPIDER"];
        let constraints = HardModeConstraintSet::from_history(&history, TARGET);

        // SPIDER confirms E and R in place
        assert_eq!(constraints.required_positions.get(&4), Some(&'E'));
        assert_eq!(constraints.required_positions.get(&5), Some(&'R'));
        assert!(constraints.absent_letters.contains(&'P'));
        assert!(constraints.absent_letters.contains(&'D'));

        assert!(
            HardModeValidator::validate("SIEVER", &history, TARGET, HardModeStrictness::Standard)
                .is_ok()
        );
        assert!(matches!(
            HardModeValidator::validate("SIRVEN", &history, TARGET, HardModeStrictness::Standard),
            Err(HardModeViolation::MissingPositionalLetter { position: 6, .. })
        ));
    }

    #[test]
    fn test_empty_history_accepts_anything() {
        let empty: [&str; 0] = [];
        assert_eq!(
            HardModeValidator::validate("QWERTY", &empty, TARGET, HardModeStrictness::Strict),
            Ok(())
        );
    }

    #[test]
    fn test_first_violation_replays_history() {
        let history = ["STRIKE", "SPIDER", "COFFEE"];
        let found = HardModeValidator::first_violation(&history, TARGET, HardModeStrictness::Standard);

        assert!(matches!(
            found,
            Some((2, HardModeViolation::MissingPositionalLetter { position: 1, .. }))
        ));
        assert_eq!(
            HardModeValidator::first_violation(&["STRIKE", "SPIDER"], TARGET, HardModeStrictness::Standard),
            None
        );
    }
}
