//! Conversion tracking service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Service marking recorded clicks as converted.
///
/// Conversion is monotonic: re-posting an already-converted click succeeds
/// without changing anything.
pub struct TrackingService<R: ClickRepository> {
    repository: Arc<R>,
}

impl<R: ClickRepository> TrackingService<R> {
    /// Creates a new tracking service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Marks a click as converted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the click does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn mark_conversion(&self, click_id: i64) -> Result<(), AppError> {
        let marked = self.repository.mark_converted(click_id).await?;

        if !marked {
            return Err(AppError::not_found(
                "Click not found",
                json!({ "id": click_id }),
            ));
        }

        metrics::counter!("conversions_recorded_total").increment(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;

    #[tokio::test]
    async fn test_mark_conversion_success() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_mark_converted()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(true));

        let service = TrackingService::new(Arc::new(mock_repo));

        assert!(service.mark_conversion(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_mark_conversion_unknown_click() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_mark_converted()
            .times(1)
            .returning(|_| Ok(false));

        let service = TrackingService::new(Arc::new(mock_repo));

        let result = service.mark_conversion(404).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
