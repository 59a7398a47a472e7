use daily_types::{GuessFeedback, LetterStatus};
use std::collections::HashMap;

pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Compare a guess with the target, one status per position.
    ///
    /// Exact matches are claimed first so that a duplicated letter in the guess
    /// is only marked Present while unmatched copies remain in the target.
    /// Comparison is case-insensitive. Both words are expected to have the same
    /// length; positions past the shorter word are Absent.
    pub fn evaluate(guess: &str, target: &str) -> Vec<LetterStatus> {
        let guess_chars: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
        let target_chars: Vec<char> = target.chars().map(|c| c.to_ascii_uppercase()).collect();

        let mut statuses = vec![LetterStatus::Absent; guess_chars.len()];

        // Letters of the target not yet claimed by a guess position
        let mut remaining: HashMap<char, usize> = HashMap::new();

        // First pass: exact matches
        for (i, &ch) in guess_chars.iter().enumerate() {
            match target_chars.get(i) {
                Some(&t) if t == ch => statuses[i] = LetterStatus::Correct,
                Some(&t) => *remaining.entry(t).or_insert(0) += 1,
                None => {}
            }
        }
        for &t in target_chars.iter().skip(guess_chars.len()) {
            *remaining.entry(t).or_insert(0) += 1;
        }

        // Second pass: misplaced letters, left to right
        for (i, ch) in guess_chars.iter().enumerate() {
            if statuses[i] == LetterStatus::Correct {
                continue;
            }
            if let Some(count) = remaining.get_mut(ch) {
                if *count > 0 {
                    *count -= 1;
                    statuses[i] = LetterStatus::Present;
                }
            }
        }

        statuses
    }

    pub fn feedback(guess: &str, target: &str) -> GuessFeedback {
        GuessFeedback {
            word: guess.to_uppercase(),
            letters: Self::evaluate(guess, target),
        }
    }

    pub fn is_solved(statuses: &[LetterStatus]) -> bool {
        !statuses.is_empty() && statuses.iter().all(|s| *s == LetterStatus::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::{Absent, Correct, Present};

    fn count_marked(statuses: &[LetterStatus], guess: &str, letter: char) -> usize {
        guess
            .chars()
            .zip(statuses)
            .filter(|(c, s)| *c == letter && **s != Absent)
            .count()
    }

    #[test]
    fn test_exact_match() {
        let statuses = GuessEvaluator::evaluate("SILVER", "SILVER");
        assert_eq!(statuses, vec![Correct; 6]);
        assert!(GuessEvaluator::is_solved(&statuses));
    }

    #[test]
    fn test_gander_against_garden() {
        // G A N D E R vs G A R D E N
        let statuses = GuessEvaluator::evaluate("GANDER", "GARDEN");
        assert_eq!(
            statuses,
            vec![Correct, Correct, Present, Correct, Correct, Present]
        );
        assert!(!statuses.contains(&Absent));
    }

    #[test]
    fn test_totter_against_button() {
        // Both middle Ts are exact; the leading T has no copy left to claim
        let statuses = GuessEvaluator::evaluate("TOTTER", "BUTTON");
        assert_eq!(
            statuses,
            vec![Absent, Present, Correct, Correct, Absent, Absent]
        );
    }

    #[test]
    fn test_correct_claimed_before_present() {
        // Target has one E at the end; the early E must not steal it
        let statuses = GuessEvaluator::evaluate("EXXXXE", "ABCDFE");
        assert_eq!(statuses[0], Absent);
        assert_eq!(statuses[5], Correct);
    }

    #[test]
    fn test_duplicate_letters_capped_by_target_count() {
        // Target has two Ls, guess has four
        let guess = "LLLLAX";
        let target = "HELLOS";
        let statuses = GuessEvaluator::evaluate(guess, target);

        assert_eq!(count_marked(&statuses, guess, 'L'), 2);
        assert_eq!(statuses[2], Correct);
        assert_eq!(statuses[3], Correct);
        assert_eq!(statuses[0], Absent);
        assert_eq!(statuses[1], Absent);
    }

    #[test]
    fn test_marked_count_is_min_of_counts() {
        let pairs = [
            ("COFFEE", "TOFFEE"),
            ("BUTTER", "BUTTON"),
            ("PURPLE", "PEPPER"),
            ("CHEESE", "SEESAW"),
            ("LEVELS", "SLEEVE"),
        ];

        for (guess, target) in pairs {
            let statuses = GuessEvaluator::evaluate(guess, target);
            for letter in guess.chars() {
                let expected = guess
                    .chars()
                    .filter(|c| *c == letter)
                    .count()
                    .min(target.chars().filter(|c| *c == letter).count());
                assert_eq!(
                    count_marked(&statuses, guess, letter),
                    expected,
                    "letter {} in {} vs {}",
                    letter,
                    guess,
                    target
                );
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            GuessEvaluator::evaluate("garden", "GARDEN"),
            GuessEvaluator::evaluate("GARDEN", "garden")
        );
    }

    #[test]
    fn test_no_shared_letters() {
        let statuses = GuessEvaluator::evaluate("QQQQQQ", "GARDEN");
        assert_eq!(statuses, vec![Absent; 6]);
        assert!(!GuessEvaluator::is_solved(&statuses));
    }

    #[test]
    fn test_feedback_uppercases_word() {
        let feedback = GuessEvaluator::feedback("garden", "GARDEN");
        assert_eq!(feedback.word, "GARDEN");
        assert!(feedback.is_solved());
    }
}
