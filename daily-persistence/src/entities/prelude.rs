pub use super::game_progress::Entity as GameProgress;
pub use super::game_results::Entity as GameResults;
pub use super::user_stats::Entity as UserStats;
