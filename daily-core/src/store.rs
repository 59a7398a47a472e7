//! Per-device key/value persistence.
//!
//! The engine only needs string values under a handful of keys; concrete
//! backends (memory, files on disk) implement [`KeyValueStore`] and the typed
//! [`ProgressStore`] wrapper does the JSON encoding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use daily_types::{GameState, Stats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value could not be encoded: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Logical purposes data is stored under. Each can be cleared on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    GameState,
    Stats,
    HardMode,
    WordCache,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::GameState => "gameState",
            StoreKey::Stats => "stats",
            StoreKey::HardMode => "hardMode",
            StoreKey::WordCache => "wordCache",
        }
    }

    /// Keys tied to the signed-in account rather than the device.
    pub fn account_scoped() -> [StoreKey; 3] {
        [StoreKey::GameState, StoreKey::Stats, StoreKey::HardMode]
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Typed access to the engine's stored values.
#[derive(Clone)]
pub struct ProgressStore {
    inner: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn read<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        match self.inner.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        if self.inner.get(key.as_str())?.as_deref() == Some(encoded.as_str()) {
            return Ok(());
        }
        self.inner.set(key.as_str(), &encoded)
    }

    /// Stored progress, or `None` when absent or unreadable.
    pub fn load_game(&self) -> Option<GameState> {
        self.read(StoreKey::GameState).unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable game state: {}", e);
            None
        })
    }

    pub fn save_game(&self, state: &GameState) -> Result<(), StoreError> {
        self.write(StoreKey::GameState, state)
    }

    pub fn load_stats(&self, max_guesses: usize) -> Stats {
        match self.read::<Stats>(StoreKey::Stats) {
            Ok(Some(stats)) => stats,
            Ok(None) => Stats::new(max_guesses),
            Err(e) => {
                tracing::warn!("Discarding unreadable stats: {}", e);
                Stats::new(max_guesses)
            }
        }
    }

    pub fn save_stats(&self, stats: &Stats) -> Result<(), StoreError> {
        self.write(StoreKey::Stats, stats)
    }

    pub fn hard_mode_preference(&self) -> bool {
        self.read(StoreKey::HardMode).ok().flatten().unwrap_or(false)
    }

    pub fn set_hard_mode_preference(&self, enabled: bool) -> Result<(), StoreError> {
        self.write(StoreKey::HardMode, &enabled)
    }

    pub fn load_validity_cache(&self) -> HashMap<String, bool> {
        self.read(StoreKey::WordCache).ok().flatten().unwrap_or_default()
    }

    pub fn save_validity_cache(&self, entries: &HashMap<String, bool>) -> Result<(), StoreError> {
        self.write(StoreKey::WordCache, entries)
    }

    pub fn clear(&self, key: StoreKey) -> Result<(), StoreError> {
        self.inner.remove(key.as_str())
    }

    /// Drop everything tied to the current account, e.g. on sign-out.
    pub fn clear_account_data(&self) -> Result<(), StoreError> {
        for key in StoreKey::account_scoped() {
            self.clear(key)?;
        }
        tracing::info!("Cleared account-scoped local data");
        Ok(())
    }
}
