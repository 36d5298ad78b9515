//! Profile read/update and public profile service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{ProfilePatch, ReferralLink, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;

/// A public profile: the user's presentation fields plus their active links.
#[derive(Debug, Clone)]
pub struct PublicProfile {
    pub user: User,
    pub links: Vec<ReferralLink>,
}

/// Service for profile customization and public profile pages.
pub struct ProfileService<U: UserRepository, L: LinkRepository> {
    users: Arc<U>,
    links: Arc<L>,
}

impl<U: UserRepository, L: LinkRepository> ProfileService<U, L> {
    /// Creates a new profile service.
    pub fn new(users: Arc<U>, links: Arc<L>) -> Self {
        Self { users, links }
    }

    /// Returns the caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_profile(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch sets no fields.
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_profile(
        &self,
        user_id: i64,
        patch: ProfilePatch,
    ) -> Result<User, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        self.users.update_profile(user_id, patch).await
    }

    /// Returns the public profile for a username: presentation fields plus
    /// active links only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the username is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn public_profile(&self, username: &str) -> Result<PublicProfile, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Profile not found", json!({ "username": username }))
            })?;

        let links = self
            .links
            .list_by_user(user.id)
            .await?
            .into_iter()
            .filter(|link| link.is_active())
            .collect();

        Ok(PublicProfile { user, links })
    }
}
