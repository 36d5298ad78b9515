mod common;

use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;

use reflinks::api::handlers::get_profile_handler;
use reflinks::api::middleware::auth;

fn protected_app(state: reflinks::AppState) -> Router {
    Router::new()
        .route("/api/profile", get(get_profile_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
}

#[sqlx::test]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);

    let server = TestServer::new(protected_app(state)).unwrap();

    let response = server.get("/api/profile").await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[sqlx::test]
async fn test_valid_token_resolves_principal(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let token = state.auth_service.issue(user_id, Some("test")).await.unwrap();

    let server = TestServer::new(protected_app(state)).unwrap();

    let response = server
        .get("/api/profile")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["username"], "alice");
}

#[sqlx::test]
async fn test_revoked_token_is_unauthorized(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let token = state.auth_service.issue(user_id, Some("test")).await.unwrap();
    state.auth_service.revoke(&token).await.unwrap();

    let server = TestServer::new(protected_app(state)).unwrap();

    let response = server
        .get("/api/profile")
        .authorization_bearer(&token)
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_garbage_token_is_unauthorized(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);

    let server = TestServer::new(protected_app(state)).unwrap();

    let response = server
        .get("/api/profile")
        .authorization_bearer("not-a-real-token")
        .await;

    response.assert_status_unauthorized();
}
