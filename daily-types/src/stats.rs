use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MAX_GUESSES;

/// Running statistics across completed daily games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Stats {
    pub played: u32,
    pub won: u32,
    #[serde(default)]
    pub played_hard: u32,
    #[serde(default)]
    pub won_hard: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins bucketed by guess count; index 0 is a first-guess win.
    pub distribution: Vec<u32>,
    #[serde(rename = "lastDate", default)]
    pub last_date_key: Option<String>,
    /// Hard mode preference, kept with the account so it follows sign-in.
    #[serde(default)]
    pub hard_mode: bool,
}

impl Stats {
    pub fn new(max_guesses: usize) -> Self {
        Self {
            played: 0,
            won: 0,
            played_hard: 0,
            won_hard: 0,
            current_streak: 0,
            max_streak: 0,
            distribution: vec![0; max_guesses],
            last_date_key: None,
            hard_mode: false,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(MAX_GUESSES)
    }
}
