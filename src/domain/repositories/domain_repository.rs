//! Repository trait for custom domains.

use crate::domain::entities::{CustomDomain, NewCustomDomain, VerificationUpdate};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for custom domain management.
///
/// Verification state is mutated only through
/// [`DomainRepository::apply_verification`], which writes the whole outcome
/// in one statement so concurrent verification runs degrade to last-write-wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Attaches a new custom domain in `pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the domain is already attached.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_domain: NewCustomDomain) -> Result<CustomDomain, AppError>;

    /// Looks up a domain by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, domain_id: i64) -> Result<Option<CustomDomain>, AppError>;

    /// Looks up a domain by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, domain: &str) -> Result<Option<CustomDomain>, AppError>;

    /// Lists all domains owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<CustomDomain>, AppError>;

    /// Persists a verification outcome and returns the updated domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn apply_verification(
        &self,
        domain_id: i64,
        update: VerificationUpdate,
    ) -> Result<CustomDomain, AppError>;

    /// Deletes a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, domain_id: i64) -> Result<(), AppError>;
}
