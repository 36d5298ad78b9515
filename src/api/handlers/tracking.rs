//! Handler for conversion tracking.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::tracking::ConversionRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Marks a recorded click as converted.
///
/// # Endpoint
///
/// `POST /track/conversions`
///
/// Public: invoked from the destination site's conversion snippet with the
/// click id handed over on redirect. Conversion is monotonic, so re-posting
/// an already-converted click is still 204.
///
/// # Errors
///
/// Returns 404 if the click does not exist.
pub async fn conversion_handler(
    State(state): State<AppState>,
    Json(payload): Json<ConversionRequest>,
) -> Result<StatusCode, AppError> {
    state
        .tracking_service
        .mark_conversion(payload.click_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
