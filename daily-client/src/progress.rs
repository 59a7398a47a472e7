use async_trait::async_trait;
use daily_types::{Ack, GameOutcome, GameProgress, GameState, Stats};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected the session token")]
    Unauthorized,
    #[error("server answered with status {0}")]
    Status(u16),
}

/// Account-side copy of progress and stats. Every call is best effort.
#[async_trait]
pub trait ProgressProvider: Send + Sync {
    /// Whether calls actually reach a server.
    fn is_remote(&self) -> bool;

    async fn fetch_progress(&self, date_key: &str) -> Result<Option<GameState>, SyncError>;
    async fn push_progress(&self, state: &GameState) -> Result<(), SyncError>;
    async fn fetch_stats(&self) -> Result<Option<Stats>, SyncError>;
    async fn push_stats(&self, stats: &Stats) -> Result<(), SyncError>;
    async fn submit_result(&self, outcome: &GameOutcome) -> Result<(), SyncError>;
}

/// Guest play: nothing leaves the device.
pub struct LocalOnly;

#[async_trait]
impl ProgressProvider for LocalOnly {
    fn is_remote(&self) -> bool {
        false
    }

    async fn fetch_progress(&self, _date_key: &str) -> Result<Option<GameState>, SyncError> {
        Ok(None)
    }

    async fn push_progress(&self, _state: &GameState) -> Result<(), SyncError> {
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<Option<Stats>, SyncError> {
        Ok(None)
    }

    async fn push_stats(&self, _stats: &Stats) -> Result<(), SyncError> {
        Ok(())
    }

    async fn submit_result(&self, _outcome: &GameOutcome) -> Result<(), SyncError> {
        Ok(())
    }
}

pub struct HttpProgress {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpProgress {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: Response) -> Result<Response, SyncError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(SyncError::Unauthorized),
            status => Err(SyncError::Status(status.as_u16())),
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), SyncError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        let _ack: Ack = Self::check(response)?.json().await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressProvider for HttpProgress {
    fn is_remote(&self) -> bool {
        true
    }

    async fn fetch_progress(&self, date_key: &str) -> Result<Option<GameState>, SyncError> {
        let response = self
            .client
            .get(self.url("/api/game-state"))
            .query(&[("date", date_key)])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let progress: GameProgress = Self::check(response)?.json().await?;

        if progress.guesses.is_empty() && !progress.game_over {
            return Ok(None);
        }
        Ok(Some(progress.into_state(date_key)))
    }

    async fn push_progress(&self, state: &GameState) -> Result<(), SyncError> {
        self.post("/api/save-progress", state).await
    }

    async fn fetch_stats(&self) -> Result<Option<Stats>, SyncError> {
        let response = self
            .client
            .get(self.url("/api/user-stats"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let stats: Stats = Self::check(response)?.json().await?;
        Ok(Some(stats))
    }

    async fn push_stats(&self, stats: &Stats) -> Result<(), SyncError> {
        self.post("/api/user-stats", stats).await
    }

    async fn submit_result(&self, outcome: &GameOutcome) -> Result<(), SyncError> {
        self.post("/api/result", outcome).await
    }
}
