//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    archive_link_handler, checkout_handler, create_domain_handler, create_link_handler,
    delete_domain_handler, devices_handler, domain_list_handler, geography_handler,
    get_profile_handler, link_list_handler, link_performance_handler, time_series_handler,
    update_link_handler, update_profile_handler, verify_domain_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /analytics/devices`    - Device-category histogram
/// - `GET    /analytics/geography`  - Top-ten country histogram
/// - `GET    /analytics/links`      - Per-link clicks/conversions/rate
/// - `GET    /analytics/timeseries` - Daily clicks/conversions series
/// - `GET    /links`                - List referral links
/// - `POST   /links`                - Create a referral link
/// - `PATCH  /links/{id}`           - Partially update a link
/// - `DELETE /links/{id}`           - Archive a link
/// - `GET    /domains`              - List custom domains
/// - `POST   /domains`              - Attach a custom domain
/// - `POST   /domains/verify`       - Run DNS verification
/// - `DELETE /domains/{id}`         - Detach a custom domain
/// - `GET    /profile`              - Own profile
/// - `PATCH  /profile`              - Update profile fields
/// - `POST   /billing/checkout`     - Start a plan-upgrade checkout
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/devices", get(devices_handler))
        .route("/analytics/geography", get(geography_handler))
        .route("/analytics/links", get(link_performance_handler))
        .route("/analytics/timeseries", get(time_series_handler))
        .route("/links", get(link_list_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            patch(update_link_handler).delete(archive_link_handler),
        )
        .route(
            "/domains",
            get(domain_list_handler).post(create_domain_handler),
        )
        .route("/domains/verify", post(verify_domain_handler))
        .route("/domains/{id}", delete(delete_domain_handler))
        .route(
            "/profile",
            get(get_profile_handler).patch(update_profile_handler),
        )
        .route("/billing/checkout", post(checkout_handler))
}
