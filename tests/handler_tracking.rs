mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

use reflinks::api::handlers::conversion_handler;

fn tracking_app(state: reflinks::AppState) -> Router {
    Router::new()
        .route("/track/conversions", post(conversion_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_conversion_marks_click(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;
    let click_id = common::create_test_click(&pool, link_id, None, None, false).await;

    let server = TestServer::new(tracking_app(state)).unwrap();

    let response = server
        .post("/track/conversions")
        .json(&json!({"click_id": click_id}))
        .await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let converted: bool = sqlx::query_scalar("SELECT converted FROM clicks WHERE id = $1")
        .bind(click_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(converted);
}

#[sqlx::test]
async fn test_conversion_is_monotonic(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;
    let click_id = common::create_test_click(&pool, link_id, None, None, true).await;

    let server = TestServer::new(tracking_app(state)).unwrap();

    // Re-posting an already-converted click succeeds and never resets it.
    let response = server
        .post("/track/conversions")
        .json(&json!({"click_id": click_id}))
        .await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let converted: bool = sqlx::query_scalar("SELECT converted FROM clicks WHERE id = $1")
        .bind(click_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(converted);
}

#[sqlx::test]
async fn test_conversion_unknown_click(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());

    let server = TestServer::new(tracking_app(state)).unwrap();

    let response = server
        .post("/track/conversions")
        .json(&json!({"click_id": 9999}))
        .await;

    response.assert_status_not_found();
}
