mod common;

use axum::{Extension, Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

use reflinks::api::handlers::{
    get_profile_handler, public_profile_handler, update_profile_handler,
};
use reflinks::api::middleware::auth::CurrentUser;

fn profile_app(state: reflinks::AppState, user_id: i64) -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(get_profile_handler).patch(update_profile_handler),
        )
        .layer(Extension(CurrentUser(user_id)))
        .with_state(state)
}

fn public_app(state: reflinks::AppState) -> Router {
    Router::new()
        .route("/u/{username}", get(public_profile_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_get_own_profile(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let server = TestServer::new(profile_app(state, user_id)).unwrap();

    let response = server.get("/api/profile").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["plan"], "free");
}

#[sqlx::test]
async fn test_update_profile_sets_and_clears_fields(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let server = TestServer::new(profile_app(state, user_id)).unwrap();

    let set = server
        .patch("/api/profile")
        .json(&json!({"display_name": "Alice", "bio": "Rust developer"}))
        .await;
    set.assert_status_ok();
    let body = set.json::<serde_json::Value>();
    assert_eq!(body["display_name"], "Alice");
    assert_eq!(body["bio"], "Rust developer");

    // Explicit null clears; absent fields stay untouched.
    let clear = server.patch("/api/profile").json(&json!({"bio": null})).await;
    clear.assert_status_ok();
    let body = clear.json::<serde_json::Value>();
    assert_eq!(body["display_name"], "Alice");
    assert_eq!(body["bio"], serde_json::Value::Null);
}

#[sqlx::test]
async fn test_update_profile_empty_patch_rejected(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let server = TestServer::new(profile_app(state, user_id)).unwrap();

    let response = server.patch("/api/profile").json(&json!({})).await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_public_profile_lists_active_links_only(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    common::create_test_link(&pool, user_id, "Visible", "visible-link").await;
    common::create_archived_link(&pool, user_id, "Hidden", "hidden-link").await;

    let server = TestServer::new(public_app(state)).unwrap();

    let response = server.get("/u/alice").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["username"], "alice");
    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["short_code"], "visible-link");
    // Internal ids stay private on the public surface.
    assert!(links[0].get("id").is_none());
}

#[sqlx::test]
async fn test_public_profile_limit_param(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    for i in 0..5 {
        common::create_test_link(&pool, user_id, &format!("Link {i}"), &format!("code-{i}")).await;
    }

    let server = TestServer::new(public_app(state)).unwrap();

    let response = server.get("/u/alice").add_query_param("limit", "2").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["links"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[sqlx::test]
async fn test_public_profile_unknown_username(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());

    let server = TestServer::new(public_app(state)).unwrap();

    let response = server.get("/u/ghost").await;

    response.assert_status_not_found();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}
