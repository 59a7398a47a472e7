pub mod config;
pub mod error;
pub mod evaluator;
pub mod game_events;
pub mod hard_mode;
pub mod reconciler;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod word_validation;

// Re-export main components
pub use config::*;
pub use error::*;
pub use evaluator::*;
pub use game_events::*;
pub use hard_mode::*;
pub use reconciler::*;
pub use scheduler::*;
pub use session::*;
pub use stats::*;
pub use store::*;
pub use word_validation::*;
