use chrono::NaiveDate;
use daily_types::Stats;

use crate::scheduler::{date_key, parse_date_key};

pub struct StatsAggregator;

impl StatsAggregator {
    /// Fold one finished game into `stats`.
    ///
    /// A date that was already recorded leaves the stats unchanged, so a
    /// replayed completion can't count twice.
    pub fn record_completed_game(
        stats: &Stats,
        date: NaiveDate,
        won: bool,
        guess_count: Option<usize>,
        hard_mode: bool,
    ) -> Stats {
        let key = date_key(date);
        if stats.last_date_key.as_deref() == Some(key.as_str()) {
            tracing::debug!("Stats already recorded for {}, skipping", key);
            return stats.clone();
        }

        let mut updated = stats.clone();
        updated.played += 1;
        if hard_mode {
            updated.played_hard += 1;
        }

        if won {
            updated.won += 1;
            if hard_mode {
                updated.won_hard += 1;
            }

            let played_yesterday = stats
                .last_date_key
                .as_deref()
                .and_then(parse_date_key)
                .is_some_and(|last| date.pred_opt() == Some(last));
            updated.current_streak = if played_yesterday {
                stats.current_streak + 1
            } else {
                1
            };

            if let Some(count) = guess_count.filter(|c| *c > 0) {
                if updated.distribution.len() < count {
                    updated.distribution.resize(count, 0);
                }
                updated.distribution[count - 1] += 1;
            }
        } else {
            updated.current_streak = 0;
        }

        updated.max_streak = updated.max_streak.max(updated.current_streak);
        updated.last_date_key = Some(key);
        updated
    }

    pub fn win_percentage(stats: &Stats) -> u32 {
        if stats.played == 0 {
            return 0;
        }
        ((stats.won as f64 / stats.played as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_consecutive_wins_build_streak() {
        let stats = Stats::default();
        let stats = StatsAggregator::record_completed_game(&stats, day(10), true, Some(3), false);
        let stats = StatsAggregator::record_completed_game(&stats, day(11), true, Some(4), false);

        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.played, 2);
        assert_eq!(stats.won, 2);
        assert_eq!(stats.distribution, vec![0, 0, 1, 1, 0, 0]);
        assert_eq!(stats.last_date_key.as_deref(), Some("2025-03-11"));
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let stats = Stats::default();
        let stats = StatsAggregator::record_completed_game(&stats, day(10), true, Some(2), false);
        let stats = StatsAggregator::record_completed_game(&stats, day(11), true, Some(2), false);
        let stats = StatsAggregator::record_completed_game(&stats, day(13), true, Some(5), false);

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 2);
    }

    #[test]
    fn test_loss_resets_streak_and_skips_distribution() {
        let stats = Stats::default();
        let stats = StatsAggregator::record_completed_game(&stats, day(10), true, Some(6), false);
        let before = stats.distribution.clone();
        let stats = StatsAggregator::record_completed_game(&stats, day(11), false, None, false);

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.played, 2);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.distribution, before);
    }

    #[test]
    fn test_hard_mode_sub_counters() {
        let stats = Stats::default();
        let stats = StatsAggregator::record_completed_game(&stats, day(1), true, Some(4), true);
        let stats = StatsAggregator::record_completed_game(&stats, day(2), false, None, true);
        let stats = StatsAggregator::record_completed_game(&stats, day(3), true, Some(1), false);

        assert_eq!(stats.played, 3);
        assert_eq!(stats.won, 2);
        assert_eq!(stats.played_hard, 2);
        assert_eq!(stats.won_hard, 1);
    }

    #[test]
    fn test_same_day_recorded_once() {
        let stats = Stats::default();
        let once = StatsAggregator::record_completed_game(&stats, day(5), true, Some(3), false);
        let twice = StatsAggregator::record_completed_game(&once, day(5), true, Some(3), false);

        assert_eq!(once, twice);
        assert_eq!(twice.played, 1);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let stats = Stats::default();
        let last_of_feb = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let stats = StatsAggregator::record_completed_game(&stats, last_of_feb, true, Some(2), false);
        let stats = StatsAggregator::record_completed_game(&stats, day(1), true, Some(2), false);

        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_win_percentage() {
        let mut stats = Stats::default();
        assert_eq!(StatsAggregator::win_percentage(&stats), 0);

        stats.played = 3;
        stats.won = 2;
        assert_eq!(StatsAggregator::win_percentage(&stats), 67);
    }
}
