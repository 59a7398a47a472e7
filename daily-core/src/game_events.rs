use daily_types::{GameOutcome, GameState, GuessFeedback, Stats};

use crate::ProgressSource;

#[derive(Debug, Clone)]
pub enum GameEvent {
    GameStarted {
        state: GameState,
    },
    ProgressRestored {
        state: GameState,
        source: ProgressSource,
    },
    GuessAccepted {
        state: GameState,
        feedback: GuessFeedback,
    },
    GameCompleted {
        state: GameState,
        outcome: GameOutcome,
        stats: Stats,
    },
    HardModeChanged {
        state: GameState,
        enabled: bool,
    },
    StatsReplaced {
        stats: Stats,
    },
    HardModePreferenceChanged {
        stats: Stats,
    },
}

impl GameEvent {
    /// The game state after the event, when the event changed it.
    pub fn state(&self) -> Option<&GameState> {
        match self {
            GameEvent::GameStarted { state }
            | GameEvent::ProgressRestored { state, .. }
            | GameEvent::GuessAccepted { state, .. }
            | GameEvent::GameCompleted { state, .. }
            | GameEvent::HardModeChanged { state, .. } => Some(state),
            GameEvent::StatsReplaced { .. } | GameEvent::HardModePreferenceChanged { .. } => None,
        }
    }
}

/// Event handler trait for reacting to session changes
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Delivers each event to every handler, in registration order
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
