//! Repository trait for bearer-token sessions.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for session credentials.
///
/// Sessions are stored by token hash only; raw tokens never reach the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create<'a>(
        &self,
        user_id: i64,
        token_hash: &str,
        name: Option<&'a str>,
    ) -> Result<(), AppError>;

    /// Resolves a token hash to the owning user id.
    ///
    /// Returns `None` for unknown or revoked sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve_user(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Updates the `last_used_at` timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Revokes a session. Returns `false` when the hash is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Lists all sessions for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Session>, AppError>;
}
