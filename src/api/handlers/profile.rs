//! Handlers for profile endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::api::dto::profile::{
    ProfileResponse, PublicProfileQuery, PublicProfileResponse, UpdateProfileRequest,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's profile.
///
/// # Endpoint
///
/// `GET /api/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.profile_service.get_profile(user_id).await?;
    Ok(Json(user.into()))
}

/// Partially updates the caller's profile.
///
/// # Endpoint
///
/// `PATCH /api/profile`
///
/// Absent fields are left unchanged; `null` clears a field.
///
/// # Errors
///
/// Returns 400 for an empty patch or oversized values.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let patch = payload.into_patch()?;

    let user = state.profile_service.update_profile(user_id, patch).await?;

    Ok(Json(user.into()))
}

/// Returns a public profile: presentation fields plus active links.
///
/// # Endpoint
///
/// `GET /u/{username}?limit=20`
///
/// Public, unauthenticated. Internal link ids and click data stay private.
///
/// # Errors
///
/// Returns 404 for an unknown username.
pub async fn public_profile_handler(
    Path(username): Path<String>,
    Query(params): Query<PublicProfileQuery>,
    State(state): State<AppState>,
) -> Result<Json<PublicProfileResponse>, AppError> {
    let profile = state.profile_service.public_profile(&username).await?;

    Ok(Json(PublicProfileResponse::from_profile(
        profile,
        params.limit,
    )))
}
