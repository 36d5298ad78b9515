//! Repository trait for referral links.

use crate::domain::entities::{LinkPatch, NewLink, ReferralLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for referral link CRUD.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new referral link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<ReferralLink, AppError>;

    /// Looks up a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, link_id: i64) -> Result<Option<ReferralLink>, AppError>;

    /// Looks up a link by its globally unique short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ReferralLink>, AppError>;

    /// Lists all links owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ReferralLink>, AppError>;

    /// Applies a partial update and returns the updated link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, link_id: i64, patch: LinkPatch) -> Result<ReferralLink, AppError>;
}
