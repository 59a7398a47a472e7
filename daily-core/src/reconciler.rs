use daily_types::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub state: GameState,
    pub source: ProgressSource,
}

pub struct StateReconciler;

impl StateReconciler {
    /// Pick between locally cached and server progress for the same day.
    ///
    /// The server copy replaces the local one only when it is for the same
    /// date and holds strictly more guesses. Diverging histories are not
    /// merged; the longer one wins.
    pub fn reconcile(local: GameState, remote: Option<GameState>) -> Reconciliation {
        match remote {
            Some(remote)
                if remote.date_key == local.date_key
                    && remote.guesses.len() > local.guesses.len() =>
            {
                tracing::info!(
                    "Adopting server progress for {} ({} guesses over {} local)",
                    remote.date_key,
                    remote.guesses.len(),
                    local.guesses.len()
                );
                Reconciliation {
                    state: remote,
                    source: ProgressSource::Remote,
                }
            }
            _ => Reconciliation {
                state: local,
                source: ProgressSource::Local,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(date: &str, guesses: &[&str]) -> GameState {
        let mut state = GameState::new(date, false);
        state.guesses = guesses.iter().map(|g| g.to_string()).collect();
        state
    }

    #[test]
    fn test_remote_with_more_guesses_wins() {
        let local = state_with("2025-03-14", &["FOREST", "DESERT"]);
        let mut remote = state_with("2025-03-14", &["FOREST", "DESERT", "STREAM", "SPRING"]);
        remote.hard_mode = true;

        let result = StateReconciler::reconcile(local, Some(remote.clone()));
        assert_eq!(result.source, ProgressSource::Remote);
        assert_eq!(result.state, remote);
    }

    #[test]
    fn test_local_with_more_guesses_kept() {
        let local = state_with("2025-03-14", &["FOREST", "DESERT", "STREAM", "SPRING"]);
        let remote = state_with("2025-03-14", &["FOREST", "DESERT"]);

        let result = StateReconciler::reconcile(local.clone(), Some(remote));
        assert_eq!(result.source, ProgressSource::Local);
        assert_eq!(result.state, local);
    }

    #[test]
    fn test_equal_length_keeps_local() {
        let local = state_with("2025-03-14", &["FOREST"]);
        let remote = state_with("2025-03-14", &["DESERT"]);

        let result = StateReconciler::reconcile(local.clone(), Some(remote));
        assert_eq!(result.state, local);
    }

    #[test]
    fn test_other_day_ignored() {
        let local = state_with("2025-03-14", &[]);
        let remote = state_with("2025-03-13", &["FOREST", "DESERT", "STREAM"]);

        let result = StateReconciler::reconcile(local.clone(), Some(remote));
        assert_eq!(result.source, ProgressSource::Local);
        assert_eq!(result.state, local);
    }

    #[test]
    fn test_missing_remote_keeps_local() {
        let local = state_with("2025-03-14", &["FOREST"]);
        let result = StateReconciler::reconcile(local.clone(), None);
        assert_eq!(result.state, local);
    }

    #[test]
    fn test_remote_finished_game_carries_flags() {
        let local = state_with("2025-03-14", &["FOREST"]);
        let mut remote = state_with("2025-03-14", &["FOREST", "SILVER"]);
        remote.is_over = true;
        remote.won = true;

        let result = StateReconciler::reconcile(local, Some(remote));
        assert!(result.state.is_over);
        assert!(result.state.won);
    }
}
