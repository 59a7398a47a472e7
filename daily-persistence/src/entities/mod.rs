pub mod prelude;

pub mod game_progress;
pub mod game_results;
pub mod user_stats;
