//! Session bootstrap: load local progress, reconcile with the account server,
//! then hand back a session that is ready for input.

use std::sync::Arc;

use chrono::NaiveDate;
use daily_core::{
    AcceptedGuess, DictionaryFallback, GameSession, GuessRejection, LocalWordList,
    ProgressSource, ProgressStore, RemoteDictionary, ScheduleError, StoreError, WordScheduler,
    WordValidityProvider,
};
use daily_persistence::FileStore;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    ClientConfig, HttpDictionary, HttpProgress, LocalOnly, ProgressProvider, SyncEventForwarder,
    SyncHandle, SyncWorker,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("local storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("could not read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer list: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("could not build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Everything a bootstrap needs, already constructed.
pub struct ClientParts {
    pub store: ProgressStore,
    pub scheduler: WordScheduler,
    pub word_list: LocalWordList,
    pub progress: Arc<dyn ProgressProvider>,
    pub dictionary: Option<Arc<dyn RemoteDictionary>>,
    pub cache_capacity: Option<usize>,
}

pub struct ClientApp {
    session: GameSession,
    validity: Arc<dyn WordValidityProvider>,
    store: ProgressStore,
    sync: SyncHandle,
    worker: JoinHandle<()>,
}

impl ClientApp {
    /// Build every collaborator from `config` and bootstrap.
    pub async fn start(config: &ClientConfig, today: NaiveDate) -> Result<Self, ClientError> {
        let puzzle = config.puzzle_config();
        let store = ProgressStore::new(Arc::new(FileStore::open(&config.data_dir)?));

        let scheduler = match &config.answer_list_path {
            Some(path) => {
                let answers = std::fs::read_to_string(path)?;
                WordScheduler::new(
                    answers.lines().filter(|l| !l.trim().is_empty()),
                    &puzzle,
                )?
            }
            None => WordScheduler::with_default_words(&puzzle),
        };

        let word_list = match &config.word_list_path {
            Some(path) => LocalWordList::new(&std::fs::read_to_string(path)?, puzzle.word_length),
            None => LocalWordList::new("", puzzle.word_length),
        };

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let progress = select_progress_provider(config, client.clone());
        let dictionary = config.dictionary_url.as_ref().map(|url| {
            Arc::new(HttpDictionary::new(client.clone(), url.clone())) as Arc<dyn RemoteDictionary>
        });

        let parts = ClientParts {
            store,
            scheduler,
            word_list,
            progress,
            dictionary,
            cache_capacity: config.cache_capacity,
        };
        Ok(Self::bootstrap(parts, config, today).await)
    }

    /// Load, reconcile, then attach sync. Input is only accepted afterwards.
    pub async fn bootstrap(parts: ClientParts, config: &ClientConfig, today: NaiveDate) -> Self {
        let ClientParts {
            store,
            scheduler,
            word_list,
            progress,
            dictionary,
            cache_capacity,
        } = parts;

        let word_list = word_list.with_answers(&scheduler);
        let validity: Arc<dyn WordValidityProvider> = match dictionary {
            Some(remote) => Arc::new(
                DictionaryFallback::new(word_list, remote).with_store(store.clone(), cache_capacity),
            ),
            None => Arc::new(word_list),
        };

        let mut session = GameSession::load(store.clone(), scheduler, config.puzzle_config(), today);

        if progress.is_remote() {
            reconcile_with_server(&mut session, progress.as_ref()).await;
        }

        let (sync, worker) = SyncWorker::spawn(progress);
        session.add_event_handler(Box::new(SyncEventForwarder::new(sync.clone())));
        tracing::info!(
            "Session ready for {} ({} guesses so far)",
            session.date_key(),
            session.state().guesses.len()
        );

        Self {
            session,
            validity,
            store,
            sync,
            worker,
        }
    }

    pub async fn submit_guess(&mut self, word: &str) -> Result<AcceptedGuess, GuessRejection> {
        self.session.submit_guess(word, self.validity.as_ref()).await
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn sync_handle(&self) -> SyncHandle {
        self.sync.clone()
    }

    /// Forget account data on this device, e.g. after signing out.
    pub fn clear_account_data(&self) -> Result<(), StoreError> {
        self.store.clear_account_data()
    }

    /// Stop accepting input and wait for queued pushes to finish.
    pub async fn shutdown(self) {
        let Self {
            session,
            sync,
            worker,
            ..
        } = self;
        drop(session);
        drop(sync);
        if let Err(e) = worker.await {
            tracing::warn!("Sync worker ended abnormally: {}", e);
        }
    }
}

pub fn select_progress_provider(
    config: &ClientConfig,
    client: reqwest::Client,
) -> Arc<dyn ProgressProvider> {
    match (&config.api_base_url, &config.auth_token) {
        (Some(base_url), Some(token)) => {
            Arc::new(HttpProgress::new(client, base_url.clone(), token.clone()))
        }
        _ => {
            tracing::info!("No account configured, playing as guest");
            Arc::new(LocalOnly)
        }
    }
}

async fn reconcile_with_server(session: &mut GameSession, progress: &dyn ProgressProvider) {
    let date_key = session.date_key().to_string();
    match progress.fetch_progress(&date_key).await {
        Ok(remote) => {
            if session.apply_reconciliation(remote) == ProgressSource::Local
                && !session.state().guesses.is_empty()
            {
                // The server is behind; bring it up to date
                if let Err(e) = progress.push_progress(session.state()).await {
                    tracing::warn!("Failed to push local progress: {}", e);
                }
            }
        }
        Err(e) => tracing::warn!("Could not fetch server progress, keeping local: {}", e),
    }

    match progress.fetch_stats().await {
        Ok(Some(remote)) if remote.played >= session.stats().played => {
            session.adopt_remote_stats(remote);
        }
        Ok(Some(_)) => {
            if let Err(e) = progress.push_stats(session.stats()).await {
                tracing::warn!("Failed to push local stats: {}", e);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not fetch server stats: {}", e),
    }
}
