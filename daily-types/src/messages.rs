use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameState;

/// Body returned by `GET /api/game-state`. The date is implied by the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameProgress {
    pub guesses: Vec<String>,
    pub hard_mode: bool,
    #[serde(default)]
    pub hard_mode_ever_disabled: bool,
    pub game_over: bool,
    pub won: bool,
}

impl GameProgress {
    pub fn into_state(self, date_key: impl Into<String>) -> GameState {
        GameState {
            date_key: date_key.into(),
            guesses: self.guesses,
            is_over: self.game_over,
            won: self.won,
            hard_mode: self.hard_mode,
            hard_mode_ever_disabled: self.hard_mode_ever_disabled,
        }
    }
}

impl From<GameState> for GameProgress {
    fn from(state: GameState) -> Self {
        Self {
            guesses: state.guesses,
            hard_mode: state.hard_mode,
            hard_mode_ever_disabled: state.hard_mode_ever_disabled,
            game_over: state.is_over,
            won: state.won,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
