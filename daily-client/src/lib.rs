pub mod app;
pub mod config;
pub mod dictionary;
pub mod progress;
pub mod sync;

pub use app::{ClientApp, ClientError, ClientParts, select_progress_provider};
pub use config::{ClientConfig, ConfigError};
pub use dictionary::HttpDictionary;
pub use progress::{HttpProgress, LocalOnly, ProgressProvider, SyncError};
pub use sync::{SyncCommand, SyncEventForwarder, SyncHandle, SyncWorker};
