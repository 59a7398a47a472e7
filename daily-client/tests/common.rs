#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use daily_client::{ClientConfig, ClientParts, ProgressProvider};
use daily_core::{LocalWordList, ProgressStore, PuzzleConfig, RemoteDictionary, WordScheduler};
use daily_persistence::connection::connect_to_memory_database;
use daily_persistence::{ProgressRepository, ResultRepository, StatsRepository};
use daily_server::{auth::AuthService, create_routes};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use warp::Filter;
use warp::http::StatusCode;

pub const ANSWER: &str = "SILVER";
pub const TOKEN: &str = "user-dana:dana@example.com:Dana";
pub const USER_ID: &str = "user-dana";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// A running account server on an ephemeral port, in dev auth mode
pub async fn spawn_server() -> (String, DatabaseConnection) {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let routes = create_routes(
        Arc::new(AuthService::new_dev_mode()),
        Arc::new(ProgressRepository::new(db.clone())),
        Arc::new(StatsRepository::new(db.clone())),
        Arc::new(ResultRepository::new(db.clone())),
        16 * 1024,
    );
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    (format!("http://{}", addr), db)
}

/// A dictionary API that knows only `words`
pub async fn spawn_dictionary(words: &[&str]) -> String {
    let known: Arc<HashSet<String>> = Arc::new(words.iter().map(|w| w.to_lowercase()).collect());

    let route = warp::path!("entries" / String).map(move |word: String| {
        if known.contains(&word) {
            warp::reply::with_status(warp::reply::json(&vec![word]), StatusCode::OK)
        } else {
            warp::reply::with_status(warp::reply::json(&"No Definitions Found"), StatusCode::NOT_FOUND)
        }
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    format!("http://{}/entries", addr)
}

pub fn test_config() -> ClientConfig {
    ClientConfig::from_lookup(|_| None).unwrap()
}

pub fn create_parts(
    store: ProgressStore,
    progress: Arc<dyn ProgressProvider>,
    dictionary: Option<Arc<dyn RemoteDictionary>>,
) -> ClientParts {
    let scheduler = WordScheduler::new([ANSWER], &PuzzleConfig::default()).unwrap();
    ClientParts {
        store,
        scheduler,
        word_list: LocalWordList::new("forest\ngarden\ndesert\nstream\nspring\nbutton", 6),
        progress,
        dictionary,
        cache_capacity: None,
    }
}
