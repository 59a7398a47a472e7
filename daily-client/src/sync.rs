use std::sync::Arc;

use daily_core::{GameEvent, GameEventHandler};
use daily_types::{GameOutcome, GameState, Stats};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ProgressProvider;

#[derive(Debug, Clone)]
pub enum SyncCommand {
    PushProgress(GameState),
    PushStats(Stats),
    SubmitResult(GameOutcome),
}

/// Queues pushes for the background worker without waiting on them.
#[derive(Clone)]
pub struct SyncHandle {
    sender: mpsc::UnboundedSender<SyncCommand>,
}

impl SyncHandle {
    pub fn send(&self, command: SyncCommand) {
        if self.sender.send(command).is_err() {
            tracing::debug!("Sync worker stopped, dropping update");
        }
    }
}

pub struct SyncWorker;

impl SyncWorker {
    /// Start the worker. It sends queued commands in order and exits once
    /// every handle has been dropped.
    pub fn spawn(provider: Arc<dyn ProgressProvider>) -> (SyncHandle, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                let result = match &command {
                    SyncCommand::PushProgress(state) => provider.push_progress(state).await,
                    SyncCommand::PushStats(stats) => provider.push_stats(stats).await,
                    SyncCommand::SubmitResult(outcome) => provider.submit_result(outcome).await,
                };
                if let Err(e) = result {
                    tracing::warn!("Sync failed for {:?}: {}", command, e);
                }
            }
            tracing::debug!("Sync worker finished");
        });

        (SyncHandle { sender }, task)
    }
}

/// Turns session events into pushes to the account server.
pub struct SyncEventForwarder {
    handle: SyncHandle,
}

impl SyncEventForwarder {
    pub fn new(handle: SyncHandle) -> Self {
        Self { handle }
    }
}

impl GameEventHandler for SyncEventForwarder {
    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GuessAccepted { state, .. } | GameEvent::HardModeChanged { state, .. } => {
                self.handle.send(SyncCommand::PushProgress(state));
            }
            GameEvent::GameCompleted { outcome, stats, .. } => {
                self.handle.send(SyncCommand::PushStats(stats));
                self.handle.send(SyncCommand::SubmitResult(outcome));
            }
            GameEvent::HardModePreferenceChanged { stats } => {
                self.handle.send(SyncCommand::PushStats(stats));
            }
            // Fresh days carry nothing yet; restored progress and stats came from the server
            GameEvent::GameStarted { .. }
            | GameEvent::ProgressRestored { .. }
            | GameEvent::StatsReplaced { .. } => {}
        }
    }
}
