#![allow(dead_code)]

use std::sync::Arc;

use daily_persistence::connection::connect_to_memory_database;
use daily_persistence::{ProgressRepository, ResultRepository, StatsRepository};
use daily_server::{auth::AuthService, create_routes};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use warp::Filter;

pub const ALICE: &str = "Bearer user-alice:alice@example.com:Alice";
pub const BOB: &str = "Bearer user-bob:bob@example.com:Bob";

pub async fn create_test_db() -> DatabaseConnection {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn create_app_with(
    db: DatabaseConnection,
    auth_service: AuthService,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_routes(
        Arc::new(auth_service),
        Arc::new(ProgressRepository::new(db.clone())),
        Arc::new(StatsRepository::new(db.clone())),
        Arc::new(ResultRepository::new(db)),
        16 * 1024,
    )
}

/// App in dev auth mode, so tests can use plain "id:email:name" tokens
pub async fn create_dev_test_app()
-> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_app_with(create_test_db().await, AuthService::new_dev_mode())
}

pub fn json_of(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}
