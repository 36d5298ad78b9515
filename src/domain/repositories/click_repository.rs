//! Repository trait for click capture and analytics reads.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for click events.
///
/// Recording happens on the capture path (redirect handler via the background
/// worker); the analytics aggregator only ever reads through
/// [`ClickRepository::list_for_user_since`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a new click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Fetches all clicks on the user's links with `clicked_at >= since`,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Click>, AppError>;

    /// Marks a click converted.
    ///
    /// Monotonic: marking an already-converted click is a no-op, never a
    /// reset. Returns `false` when the click does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn mark_converted(&self, click_id: i64) -> Result<bool, AppError>;
}
