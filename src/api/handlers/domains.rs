//! Handlers for custom domain endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::domains::{
    CreateDomainRequest, DomainItem, DomainListResponse, VerifyDomainRequest,
    VerifyDomainResponse,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's custom domains.
///
/// # Endpoint
///
/// `GET /api/domains`
pub async fn domain_list_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<DomainListResponse>, AppError> {
    let domains = state.domain_service.list_domains(user_id).await?;

    Ok(Json(DomainListResponse {
        items: domains.into_iter().map(Into::into).collect(),
    }))
}

/// Attaches a new custom domain in `pending` state.
///
/// # Endpoint
///
/// `POST /api/domains`
///
/// # Errors
///
/// Returns 400 if the domain name is invalid.
/// Returns 409 if the domain is already attached.
pub async fn create_domain_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<CreateDomainRequest>,
) -> Result<(StatusCode, Json<DomainItem>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::bad_request("Invalid domain payload", json!(e)))?;

    let domain = state
        .domain_service
        .create_domain(user_id, payload.domain)
        .await?;

    Ok((StatusCode::CREATED, Json(domain.into())))
}

/// Runs DNS verification for one of the caller's domains.
///
/// # Endpoint
///
/// `POST /api/domains/verify`
///
/// Ownership is checked before any DNS lookup. The response reports the
/// resulting state either way; `success` mirrors `verified`.
///
/// # Errors
///
/// Returns 403 for a foreign domain, 404 if missing. DNS lookup failures do
/// not fail the request; they land the domain in `error` state.
pub async fn verify_domain_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<VerifyDomainRequest>,
) -> Result<Json<VerifyDomainResponse>, AppError> {
    let domain = state
        .domain_service
        .verify_domain(user_id, payload.domain_id)
        .await?;

    Ok(Json(VerifyDomainResponse {
        success: domain.verified,
        verified: domain.verified,
        domain: domain.into(),
    }))
}

/// Detaches one of the caller's domains.
///
/// # Endpoint
///
/// `DELETE /api/domains/{id}`
///
/// # Errors
///
/// Returns 403 for a foreign domain, 404 if missing.
pub async fn delete_domain_handler(
    Path(domain_id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.domain_service.delete_domain(user_id, domain_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
