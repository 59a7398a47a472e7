use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::auth::{AuthError, AuthService, AuthenticatedUser, bearer_token};
use daily_core::parse_date_key;
use daily_persistence::{ProgressRepository, ResultRepository, StatsRepository};
use daily_types::{Ack, ApiError, GameOutcome, GameProgress, GameState, Stats};

pub mod auth;
pub mod config;

type ApiReply = WithStatus<Json>;

#[derive(Deserialize)]
struct DateQuery {
    date: String,
}

pub fn create_routes(
    auth_service: Arc<AuthService>,
    progress_repository: Arc<ProgressRepository>,
    stats_repository: Arc<StatsRepository>,
    result_repository: Arc<ResultRepository>,
    max_body_bytes: u64,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    let progress_filter = warp::any().map({
        let progress_repository = progress_repository.clone();
        move || progress_repository.clone()
    });

    let stats_filter = warp::any().map({
        let stats_repository = stats_repository.clone();
        move || stats_repository.clone()
    });

    let result_filter = warp::any().map({
        let result_repository = result_repository.clone();
        move || result_repository.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let get_progress = warp::path!("api" / "game-state")
        .and(warp::get())
        .and(warp::query::<DateQuery>())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(progress_filter.clone())
        .and_then(handle_get_progress);

    let save_progress = warp::path!("api" / "save-progress")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(json_body::<GameState>(max_body_bytes))
        .and(auth_filter.clone())
        .and(progress_filter.clone())
        .and(result_filter.clone())
        .and_then(handle_save_progress);

    let get_stats = warp::path!("api" / "user-stats")
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(stats_filter.clone())
        .and_then(handle_get_stats);

    let save_stats = warp::path!("api" / "user-stats")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(json_body::<Stats>(max_body_bytes))
        .and(auth_filter.clone())
        .and(stats_filter.clone())
        .and_then(handle_save_stats);

    let submit_result = warp::path!("api" / "result")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(json_body::<GameOutcome>(max_body_bytes))
        .and(auth_filter.clone())
        .and(result_filter.clone())
        .and_then(handle_submit_result);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(get_progress)
        .or(save_progress)
        .or(get_stats)
        .or(save_stats)
        .or(submit_result)
        .with(cors)
        .with(warp::log("daily_word"))
}

fn json_body<T: DeserializeOwned + Send>(
    limit: u64,
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(limit).and(warp::body::json())
}

fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> ApiReply {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(message: &str, status: StatusCode) -> ApiReply {
    json_reply(&ApiError::new(message), status)
}

fn authenticate(
    auth_header: Option<String>,
    auth_service: &AuthService,
) -> Result<AuthenticatedUser, ApiReply> {
    let token = auth_header
        .as_deref()
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken);

    token
        .and_then(|t| auth_service.validate_token(t))
        .map_err(|e| error_reply(&e.to_string(), StatusCode::UNAUTHORIZED))
}

fn invalid_date(date: &str) -> Option<ApiReply> {
    parse_date_key(date)
        .is_none()
        .then(|| error_reply("Invalid date, expected YYYY-MM-DD", StatusCode::BAD_REQUEST))
}

async fn handle_get_progress(
    query: DateQuery,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    progress_repository: Arc<ProgressRepository>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(auth_header, &auth_service) {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Some(reply) = invalid_date(&query.date) {
        return Ok(reply);
    }

    match progress_repository.find(&user.id, &query.date).await {
        Ok(Some(state)) => Ok(json_reply(&GameProgress::from(state), StatusCode::OK)),
        Ok(None) => Ok(json_reply(&GameProgress::default(), StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to load progress for {}: {}", user.id, err);
            Ok(error_reply(
                "Failed to load progress",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_save_progress(
    auth_header: Option<String>,
    state: GameState,
    auth_service: Arc<AuthService>,
    progress_repository: Arc<ProgressRepository>,
    result_repository: Arc<ResultRepository>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(auth_header, &auth_service) {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Some(reply) = invalid_date(&state.date_key) {
        return Ok(reply);
    }

    if let Err(err) = progress_repository.save(&user.id, &state).await {
        tracing::error!("Failed to save progress for {}: {}", user.id, err);
        return Ok(error_reply(
            "Failed to save progress",
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    // A finished game also leaves a result, once per day
    if state.is_over {
        if let Err(err) = result_repository
            .record(&user.id, &GameOutcome::from_state(&state))
            .await
        {
            tracing::error!("Failed to record result for {}: {}", user.id, err);
            return Ok(error_reply(
                "Failed to record result",
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
    }

    Ok(json_reply(&Ack::ok(), StatusCode::OK))
}

async fn handle_get_stats(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    stats_repository: Arc<StatsRepository>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(auth_header, &auth_service) {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match stats_repository.find(&user.id).await {
        Ok(stats) => Ok(json_reply(&stats.unwrap_or_default(), StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to fetch stats for {}: {}", user.id, err);
            Ok(error_reply(
                "Failed to fetch user stats",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_save_stats(
    auth_header: Option<String>,
    stats: Stats,
    auth_service: Arc<AuthService>,
    stats_repository: Arc<StatsRepository>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(auth_header, &auth_service) {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match stats_repository.save(&user.id, &stats).await {
        Ok(()) => Ok(json_reply(&Ack::ok(), StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to save stats for {}: {}", user.id, err);
            Ok(error_reply(
                "Failed to save user stats",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_submit_result(
    auth_header: Option<String>,
    outcome: GameOutcome,
    auth_service: Arc<AuthService>,
    result_repository: Arc<ResultRepository>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(auth_header, &auth_service) {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Some(reply) = invalid_date(&outcome.date) {
        return Ok(reply);
    }

    match result_repository.record(&user.id, &outcome).await {
        Ok(inserted) => {
            tracing::debug!(
                "Result for {} on {} inserted={}",
                user.id,
                outcome.date,
                inserted
            );
            Ok(json_reply(&Ack::ok(), StatusCode::OK))
        }
        Err(err) => {
            tracing::error!("Failed to record result for {}: {}", user.id, err);
            Ok(error_reply(
                "Failed to record result",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
