//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`            - Referral link redirect (public)
//! - `GET  /health`            - Health check: DB, cache, click queue (public)
//! - `GET  /u/{username}`      - Public profile (public)
//! - `POST /track/conversions` - Conversion capture (public)
//! - `/api/*`                  - REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer session token on the `/api` surface
//! - **Path normalization** - Trailing slash handling
use crate::api;
use crate::api::handlers::{
    conversion_handler, health_handler, public_profile_handler, redirect_handler,
};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public_router = Router::new()
        .route("/u/{username}", get(public_profile_handler))
        .route("/track/conversions", post(conversion_handler))
        .route("/{code}", get(redirect_handler))
        .layer(rate_limit::layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(public_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
