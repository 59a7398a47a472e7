use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use daily_core::{HardModeStrictness, PuzzleConfig};
use thiserror::Error;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account server; without it (or a token) the client plays as a guest.
    pub api_base_url: Option<String>,
    pub auth_token: Option<String>,
    /// `None` turns remote dictionary lookups off.
    pub dictionary_url: Option<String>,
    pub data_dir: PathBuf,
    pub word_list_path: Option<PathBuf>,
    pub answer_list_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub cache_capacity: Option<usize>,
    pub strictness: HardModeStrictness,
    pub schedule_secret: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let dictionary_url = match non_empty("DICTIONARY_URL") {
            Some(url) if url == "off" => None,
            Some(url) => Some(url),
            None => Some(DEFAULT_DICTIONARY_URL.to_string()),
        };

        let strictness = match non_empty("HARD_MODE_STRICTNESS").as_deref() {
            None | Some("standard") => HardModeStrictness::Standard,
            Some("strict") => HardModeStrictness::Strict,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "HARD_MODE_STRICTNESS",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            api_base_url: non_empty("DAILY_WORD_API_URL").map(|u| u.trim_end_matches('/').to_string()),
            auth_token: non_empty("DAILY_WORD_TOKEN"),
            dictionary_url,
            data_dir: non_empty("DAILY_WORD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".daily-word")),
            word_list_path: non_empty("WORD_LIST_PATH").map(PathBuf::from),
            answer_list_path: non_empty("ANSWER_LIST_PATH").map(PathBuf::from),
            request_timeout: Duration::from_millis(parse_or(&non_empty, "REQUEST_TIMEOUT_MS", 5000)?),
            cache_capacity: match non_empty("WORD_CACHE_CAPACITY") {
                Some(_) => Some(parse_or(&non_empty, "WORD_CACHE_CAPACITY", 0)?),
                None => None,
            },
            strictness,
            schedule_secret: parse_or(&non_empty, "SCHEDULE_SECRET", 0)?,
        })
    }

    pub fn puzzle_config(&self) -> PuzzleConfig {
        PuzzleConfig::default()
            .with_strictness(self.strictness)
            .with_schedule_secret(self.schedule_secret)
    }

    /// Whether progress should sync with the account server.
    pub fn is_signed_in(&self) -> bool {
        self.api_base_url.is_some() && self.auth_token.is_some()
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
