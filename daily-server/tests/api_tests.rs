mod common;

use common::*;
use daily_persistence::ResultRepository;
use daily_server::auth::AuthService;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&app)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "OK");
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("GET")
        .path("/api/user-stats")
        .reply(&app)
        .await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_of(response.body())["error"], "Authentication required");

    let response = warp::test::request()
        .method("POST")
        .path("/api/result")
        .header("authorization", "Bearer nobody")
        .json(&json!({"date": "2025-03-14", "won": true, "guesses": 3, "hard_mode": false}))
        .reply(&app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_missing_progress_is_empty() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("GET")
        .path("/api/game-state?date=2025-03-14")
        .header("authorization", ALICE)
        .reply(&app)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        json_of(response.body()),
        json!({
            "guesses": [],
            "hardMode": false,
            "hardModeEverDisabled": false,
            "gameOver": false,
            "won": false
        })
    );
}

#[tokio::test]
async fn test_save_and_fetch_progress() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("POST")
        .path("/api/save-progress")
        .header("authorization", ALICE)
        .json(&json!({
            "date": "2025-03-14",
            "guesses": ["FOREST", "STRIKE"],
            "hardMode": true,
            "gameOver": false,
            "won": false
        }))
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_of(response.body()), json!({"ok": true}));

    let response = warp::test::request()
        .method("GET")
        .path("/api/game-state?date=2025-03-14")
        .header("authorization", ALICE)
        .reply(&app)
        .await;
    let body = json_of(response.body());
    assert_eq!(body["guesses"], json!(["FOREST", "STRIKE"]));
    assert_eq!(body["hardMode"], true);

    // Other accounts don't see it
    let response = warp::test::request()
        .method("GET")
        .path("/api/game-state?date=2025-03-14")
        .header("authorization", BOB)
        .reply(&app)
        .await;
    assert_eq!(json_of(response.body())["guesses"], json!([]));
}

#[tokio::test]
async fn test_finished_progress_records_result_once() {
    let db = create_test_db().await;
    let app = create_app_with(db.clone(), AuthService::new_dev_mode());
    let results = ResultRepository::new(db);

    for guesses in [json!(["FOREST", "SILVER"]), json!(["SILVER"])] {
        let response = warp::test::request()
            .method("POST")
            .path("/api/save-progress")
            .header("authorization", ALICE)
            .json(&json!({
                "date": "2025-03-14",
                "guesses": guesses,
                "hardMode": false,
                "gameOver": true,
                "won": true
            }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
    }

    let recorded = results.find("user-alice", "2025-03-14").await.unwrap().unwrap();
    assert!(recorded.won);
    assert_eq!(recorded.guesses, Some(2));
    assert_eq!(results.count_for_user("user-alice").await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_date_rejected() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("GET")
        .path("/api/game-state?date=yesterday")
        .header("authorization", ALICE)
        .reply(&app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_stats_default_then_saved() {
    let app = create_dev_test_app().await;

    let response = warp::test::request()
        .method("GET")
        .path("/api/user-stats")
        .header("authorization", ALICE)
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);
    let body = json_of(response.body());
    assert_eq!(body["played"], 0);
    assert_eq!(body["distribution"], json!([0, 0, 0, 0, 0, 0]));

    let stats = json!({
        "played": 5,
        "won": 4,
        "playedHard": 1,
        "wonHard": 1,
        "currentStreak": 2,
        "maxStreak": 3,
        "distribution": [0, 1, 2, 1, 0, 0],
        "lastDate": "2025-03-14",
        "hardMode": true
    });
    let response = warp::test::request()
        .method("POST")
        .path("/api/user-stats")
        .header("authorization", ALICE)
        .json(&stats)
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);

    let response = warp::test::request()
        .method("GET")
        .path("/api/user-stats")
        .header("authorization", ALICE)
        .reply(&app)
        .await;
    assert_eq!(json_of(response.body()), stats);
}

#[tokio::test]
async fn test_submit_result_is_insert_if_absent() {
    let db = create_test_db().await;
    let app = create_app_with(db.clone(), AuthService::new_dev_mode());

    for guesses in [json!(4), json!(1)] {
        let response = warp::test::request()
            .method("POST")
            .path("/api/result")
            .header("authorization", BOB)
            .json(&json!({"date": "2025-03-14", "won": true, "guesses": guesses, "hard_mode": true}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
    }

    let recorded = ResultRepository::new(db)
        .find("user-bob", "2025-03-14")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recorded.guesses, Some(4));
    assert!(recorded.hard_mode);
}

#[tokio::test]
async fn test_signed_tokens_outside_dev_mode() {
    let auth = AuthService::new("integration-secret");
    let token = auth.issue_token("user-carol", None, 3600).unwrap();
    let app = create_app_with(create_test_db().await, auth);

    let response = warp::test::request()
        .method("GET")
        .path("/api/user-stats")
        .header("authorization", format!("Bearer {}", token))
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);

    // Dev-style tokens are refused when signatures are checked
    let response = warp::test::request()
        .method("GET")
        .path("/api/user-stats")
        .header("authorization", ALICE)
        .reply(&app)
        .await;
    assert_eq!(response.status(), 401);
}
