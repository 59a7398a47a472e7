use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use crate::{ProgressStore, WordScheduler};

#[derive(Debug, Error)]
pub enum ValidityError {
    #[error("dictionary unreachable: {0}")]
    Network(String),
    #[error("dictionary answered with status {0}")]
    UnexpectedStatus(u16),
}

/// Answers whether a guess is an acceptable word.
///
/// Lookups may go over the network. A lookup that fails is reported as
/// `false`; the player can simply try again.
#[async_trait]
pub trait WordValidityProvider: Send + Sync {
    async fn is_valid_word(&self, word: &str) -> bool;
}

/// A dictionary reached over the network.
#[async_trait]
pub trait RemoteDictionary: Send + Sync {
    /// `Ok(false)` is a definitive "no such word"; errors are transient.
    async fn lookup(&self, word: &str) -> Result<bool, ValidityError>;
}

pub struct LocalWordList {
    valid_words: HashSet<String>,
    word_length: usize,
}

impl LocalWordList {
    /// Parse a newline separated list. Blank lines, `#` comments and words of
    /// the wrong length are skipped.
    pub fn new(word_list: &str, word_length: usize) -> Self {
        Self::from_words(word_list.lines(), word_length)
    }

    pub fn from_words<I, S>(words: I, word_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .filter(|w| w.chars().count() == word_length)
            .filter(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();

        Self {
            valid_words,
            word_length,
        }
    }

    /// Every scheduled answer is always a valid guess.
    pub fn with_answers(mut self, scheduler: &WordScheduler) -> Self {
        self.valid_words.extend(scheduler.words().iter().cloned());
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        word.chars().count() == self.word_length && self.valid_words.contains(&word)
    }

    pub fn len(&self) -> usize {
        self.valid_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_words.is_empty()
    }
}

#[async_trait]
impl WordValidityProvider for LocalWordList {
    async fn is_valid_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Remembered dictionary answers, keyed by the exact guess.
///
/// Entries are never evicted. With a capacity set, new answers stop being
/// remembered once it is reached.
#[derive(Debug, Clone, Default)]
pub struct ValidityCache {
    entries: HashMap<String, bool>,
    capacity: Option<usize>,
}

impl ValidityCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    pub fn from_entries(entries: HashMap<String, bool>, capacity: Option<usize>) -> Self {
        Self { entries, capacity }
    }

    pub fn get(&self, word: &str) -> Option<bool> {
        self.entries.get(word).copied()
    }

    /// Returns whether the answer was stored.
    pub fn insert(&mut self, word: &str, valid: bool) -> bool {
        if self.entries.contains_key(word) {
            self.entries.insert(word.to_string(), valid);
            return true;
        }
        if self.capacity.is_some_and(|cap| self.entries.len() >= cap) {
            return false;
        }
        self.entries.insert(word.to_string(), valid);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &HashMap<String, bool> {
        &self.entries
    }
}

/// Local list first, then remembered answers, then the remote dictionary.
pub struct DictionaryFallback {
    local: LocalWordList,
    cache: Mutex<ValidityCache>,
    remote: Arc<dyn RemoteDictionary>,
    store: Option<ProgressStore>,
}

impl DictionaryFallback {
    pub fn new(local: LocalWordList, remote: Arc<dyn RemoteDictionary>) -> Self {
        Self {
            local,
            cache: Mutex::new(ValidityCache::default()),
            remote,
            store: None,
        }
    }

    /// Load remembered answers from `store` and write new ones back to it.
    pub fn with_store(mut self, store: ProgressStore, capacity: Option<usize>) -> Self {
        let entries = store.load_validity_cache();
        tracing::debug!("Loaded {} cached dictionary answers", entries.len());
        self.cache = Mutex::new(ValidityCache::from_entries(entries, capacity));
        self.store = Some(store);
        self
    }

    pub fn cached(&self, word: &str) -> Option<bool> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(word)
    }

    fn remember(&self, word: &str, valid: bool) {
        let snapshot = {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if !cache.insert(word, valid) {
                tracing::debug!("Validity cache full, not remembering {}", word);
                return;
            }
            cache.entries().clone()
        };

        if let Some(store) = &self.store {
            if let Err(e) = store.save_validity_cache(&snapshot) {
                tracing::warn!("Failed to persist validity cache: {}", e);
            }
        }
    }
}

#[async_trait]
impl WordValidityProvider for DictionaryFallback {
    async fn is_valid_word(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();

        if self.local.contains(&word) {
            return true;
        }

        if let Some(valid) = self.cached(&word) {
            return valid;
        }

        match self.remote.lookup(&word).await {
            Ok(valid) => {
                self.remember(&word, valid);
                valid
            }
            Err(e) => {
                tracing::warn!("Dictionary lookup for {} failed: {}", word, e);
                false
            }
        }
    }
}
