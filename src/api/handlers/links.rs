//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkItem, LinkListResponse, UpdateLinkRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::{LinkPatch, LinkStatus};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a referral link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Errors
///
/// Returns 400 if the payload is invalid.
/// Returns 409 if the custom code is taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkItem>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::bad_request("Invalid link payload", json!(e)))?;

    let link = state
        .link_service
        .create_link(user_id, payload.name, payload.target_url, payload.custom_code)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn link_list_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_links(user_id).await?;

    Ok(Json(LinkListResponse {
        items: links.into_iter().map(Into::into).collect(),
    }))
}

/// Partially updates one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Errors
///
/// Returns 400 for invalid fields, 403 for a foreign link, 404 if missing.
pub async fn update_link_handler(
    Path(link_id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkItem>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::bad_request("Invalid link payload", json!(e)))?;

    let status = match payload.status.as_deref() {
        None => None,
        Some(raw) => Some(LinkStatus::parse(raw).ok_or_else(|| {
            AppError::bad_request(
                "Unknown status",
                json!({ "allowed": ["active", "archived"], "got": raw }),
            )
        })?),
    };

    let patch = LinkPatch {
        name: payload.name,
        target_url: payload.target_url,
        status,
    };

    let link = state.link_service.update_link(user_id, link_id, patch).await?;

    // Cached redirects may now point at stale targets.
    let _ = state.cache.invalidate(&link.short_code).await;

    Ok(Json(link.into()))
}

/// Archives one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// Archived links stop redirecting but keep their click history.
pub async fn archive_link_handler(
    Path(link_id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    let link = state.link_service.archive_link(user_id, link_id).await?;

    let _ = state.cache.invalidate(&link.short_code).await;

    Ok(StatusCode::NO_CONTENT)
}
