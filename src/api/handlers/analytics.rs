//! Handlers for the analytics endpoints.
//!
//! All four views accept the same `timeframe` query parameter
//! (`7d|30d|90d|1y|all`, default `30d`) and are scoped to the authenticated
//! principal's links.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::analytics::{
    AnalyticsQuery, CountryStatItem, DeviceBreakdownResponse, LinkPerformanceItem, TimeSeriesItem,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Device-category histogram.
///
/// # Endpoint
///
/// `GET /api/analytics/devices?timeframe=30d`
///
/// All four categories are always present in the response, zero counts
/// included.
///
/// # Errors
///
/// Returns 400 for an unknown timeframe, 401 without a valid session,
/// 404 when the principal's user record is gone.
pub async fn devices_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<DeviceBreakdownResponse>, AppError> {
    let timeframe = params.timeframe()?;

    let breakdown = state
        .analytics_service
        .device_breakdown(user_id, timeframe)
        .await?;

    Ok(Json(DeviceBreakdownResponse::from_breakdown(
        timeframe, breakdown,
    )))
}

/// Top-ten country histogram, sorted descending by clicks.
///
/// # Endpoint
///
/// `GET /api/analytics/geography?timeframe=30d`
pub async fn geography_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Vec<CountryStatItem>>, AppError> {
    let timeframe = params.timeframe()?;

    let countries = state
        .analytics_service
        .country_breakdown(user_id, timeframe)
        .await?;

    Ok(Json(countries.into_iter().map(Into::into).collect()))
}

/// Per-link clicks, conversions, and conversion rate, sorted descending by
/// clicks.
///
/// # Endpoint
///
/// `GET /api/analytics/links?timeframe=30d`
pub async fn link_performance_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Vec<LinkPerformanceItem>>, AppError> {
    let timeframe = params.timeframe()?;

    let performance = state
        .analytics_service
        .link_performance(user_id, timeframe)
        .await?;

    Ok(Json(performance.into_iter().map(Into::into).collect()))
}

/// Daily clicks/conversions series; only days with events, ascending.
///
/// # Endpoint
///
/// `GET /api/analytics/timeseries?timeframe=30d`
pub async fn time_series_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Vec<TimeSeriesItem>>, AppError> {
    let timeframe = params.timeframe()?;

    let series = state
        .analytics_service
        .time_series(user_id, timeframe)
        .await?;

    Ok(Json(series.into_iter().map(Into::into).collect()))
}
