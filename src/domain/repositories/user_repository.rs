//! Repository trait for user accounts and profiles.

use crate::domain::entities::{NewUser, ProfilePatch, SubscriptionPlan, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user on the free plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError>;

    /// Looks up a user by public username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Applies a partial profile update and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_profile(&self, user_id: i64, patch: ProfilePatch) -> Result<User, AppError>;

    /// Changes the user's subscription plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_plan(&self, user_id: i64, plan: SubscriptionPlan) -> Result<(), AppError>;
}
