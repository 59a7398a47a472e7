pub mod progress_repository;
pub mod result_repository;
pub mod stats_repository;

pub use progress_repository::ProgressRepository;
pub use result_repository::ResultRepository;
pub use stats_repository::StatsRepository;
