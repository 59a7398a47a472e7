pub mod game;
pub mod messages;
pub mod stats;
pub mod errors;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use stats::*;
pub use errors::*;
