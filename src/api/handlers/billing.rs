//! Handler for billing checkout.

use axum::{Extension, Json, extract::State};

use crate::api::dto::billing::{CheckoutRequestBody, CheckoutResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Starts a provider checkout for a plan upgrade.
///
/// # Endpoint
///
/// `POST /api/billing/checkout`
///
/// The provider handles payment collection; this returns its redirect URL
/// and a reference for reconciliation.
///
/// # Errors
///
/// Returns 400 for the free plan, an unknown selector, or an unconfigured
/// provider. Provider failures surface as 500 with a generic message.
pub async fn checkout_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<CheckoutRequestBody>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let (plan, provider) = payload.parse()?;

    let session = state
        .billing_service
        .create_checkout(user_id, plan, provider)
        .await?;

    Ok(Json(session.into()))
}
