mod common;

use axum::{Extension, Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use reflinks::api::handlers::{
    devices_handler, geography_handler, link_performance_handler, time_series_handler,
};
use reflinks::api::middleware::auth::CurrentUser;

fn analytics_app(state: reflinks::AppState, user_id: i64) -> Router {
    Router::new()
        .route("/api/analytics/devices", get(devices_handler))
        .route("/api/analytics/geography", get(geography_handler))
        .route("/api/analytics/links", get(link_performance_handler))
        .route("/api/analytics/timeseries", get(time_series_handler))
        .layer(Extension(CurrentUser(user_id)))
        .with_state(state)
}

#[sqlx::test]
async fn test_device_breakdown_includes_all_categories(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;

    common::create_test_click(&pool, link_id, Some("Mobile Safari"), None, false).await;
    common::create_test_click(&pool, link_id, Some("desktop"), None, false).await;
    common::create_test_click(&pool, link_id, None, None, false).await;

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let response = server.get("/api/analytics/devices").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["mobile"], 1);
    assert_eq!(json["desktop"], 1);
    assert_eq!(json["other"], 1);
    assert_eq!(json["tablet"], 0);
}

#[sqlx::test]
async fn test_geography_sorted_descending_with_unknown(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;

    for _ in 0..3 {
        common::create_test_click(&pool, link_id, None, Some("DE"), false).await;
    }
    common::create_test_click(&pool, link_id, None, Some("SE"), false).await;
    common::create_test_click(&pool, link_id, None, None, false).await;

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let response = server.get("/api/analytics/geography").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["country"], "DE");
    assert_eq!(entries[0]["clicks"], 3);
    assert!(entries.iter().any(|e| e["country"] == "Unknown"));
}

#[sqlx::test]
async fn test_link_performance_rates_and_order(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let busy = common::create_test_link(&pool, user_id, "Busy", "busy-link").await;
    let quiet = common::create_test_link(&pool, user_id, "Quiet", "quiet-link").await;

    for i in 0..10 {
        common::create_test_click(&pool, busy, None, None, i < 3).await;
    }
    let _ = quiet; // no clicks: still present, at zero

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let response = server.get("/api/analytics/links").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["short_code"], "busy-link");
    assert_eq!(entries[0]["clicks"], 10);
    assert_eq!(entries[0]["conversions"], 3);
    assert_eq!(entries[0]["conversion_rate"], 30.0);
    assert_eq!(entries[1]["clicks"], 0);
    assert_eq!(entries[1]["conversion_rate"], 0.0);
}

#[sqlx::test]
async fn test_timeframe_excludes_old_clicks(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;

    common::create_click_at(&pool, link_id, Utc::now() - Duration::days(60), false).await;
    common::create_click_at(&pool, link_id, Utc::now() - Duration::days(1), false).await;

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let recent = server
        .get("/api/analytics/timeseries")
        .add_query_param("timeframe", "7d")
        .await;
    recent.assert_status_ok();
    assert_eq!(recent.json::<serde_json::Value>().as_array().unwrap().len(), 1);

    let all = server
        .get("/api/analytics/timeseries")
        .add_query_param("timeframe", "all")
        .await;
    all.assert_status_ok();
    assert_eq!(all.json::<serde_json::Value>().as_array().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_time_series_dates_strictly_ascending(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let link_id = common::create_test_link(&pool, user_id, "Campaign", "campaign").await;

    for days_ago in [5, 3, 3, 1] {
        common::create_click_at(&pool, link_id, Utc::now() - Duration::days(days_ago), true).await;
    }

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let response = server.get("/api/analytics/timeseries").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    let dates: Vec<&str> = entries.iter().map(|e| e["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(dates, sorted, "dates must be unique and ascending");
}

#[sqlx::test]
async fn test_invalid_timeframe_is_bad_request(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let server = TestServer::new(analytics_app(state, user_id)).unwrap();

    let response = server
        .get("/api/analytics/devices")
        .add_query_param("timeframe", "14d")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_clicks_scoped_to_principal(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let alice = common::create_test_user(&pool, "a@example.com", "alice").await;
    let bob = common::create_test_user(&pool, "b@example.com", "bob").await;
    let bobs_link = common::create_test_link(&pool, bob, "Bobs", "bobs-link").await;
    common::create_test_click(&pool, bobs_link, Some("mobile"), None, false).await;

    let server = TestServer::new(analytics_app(state, alice)).unwrap();

    let response = server.get("/api/analytics/devices").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["mobile"], 0);
    assert_eq!(json["other"], 0);
}
