//! Background worker draining the click queue into the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::{Retry, strategy::FixedInterval};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::utils::device::device_hint;

/// Insert attempts per click, including the first.
const INSERT_ATTEMPTS: usize = 3;

/// Delay between insert attempts.
const RETRY_INTERVAL: Duration = Duration::from_millis(200);

/// Drains click events from the channel and persists them.
///
/// Each insert is retried a few times on failure; a click that still cannot
/// be written is dropped with a log line and a counter bump rather than
/// blocking the queue.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: ClickRepository + 'static,
{
    while let Some(event) = rx.recv().await {
        let new_click = NewClick {
            link_id: event.link_id,
            device_type: device_hint(event.user_agent.as_deref()).map(|s| s.to_string()),
            country: event.country,
            referer: event.referer,
            ip: event.ip,
        };

        let strategy = FixedInterval::new(RETRY_INTERVAL).take(INSERT_ATTEMPTS - 1);
        let result = Retry::spawn(strategy, || {
            let click = new_click.clone();
            let repo = repository.clone();
            async move { repo.record_click(click).await }
        })
        .await;

        match result {
            Ok(_) => metrics::counter!("clicks_recorded_total").increment(1),
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::error!("Dropping click for link {}: {}", event.link_id, e);
            }
        }
    }

    tracing::info!("Click queue closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockClickRepository;
    use crate::error::AppError;
    use chrono::Utc;
    use serde_json::json;

    fn stored_click(link_id: i64) -> Click {
        Click {
            id: 1,
            link_id,
            clicked_at: Utc::now(),
            device_type: Some("mobile".to_string()),
            country: None,
            referer: None,
            ip: None,
            converted: false,
        }
    }

    #[tokio::test]
    async fn test_worker_records_queued_click() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_record_click()
            .withf(|click| click.link_id == 42 && click.device_type.as_deref() == Some("mobile"))
            .times(1)
            .returning(|_| Ok(stored_click(42)));

        let (tx, rx) = mpsc::channel(10);
        let handle = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new(
            42,
            None,
            Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile Safari"),
            None,
            None,
        ))
        .await
        .unwrap();

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_failed_insert() {
        let mut mock_repo = MockClickRepository::new();
        let mut calls = 0;
        mock_repo
            .expect_record_click()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(AppError::internal("Database error", json!({})))
                } else {
                    Ok(stored_click(7))
                }
            });

        let (tx, rx) = mpsc::channel(10);
        let handle = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new(7, None, None, None, None))
            .await
            .unwrap();

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_drops_click_after_exhausted_retries() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_record_click()
            .times(INSERT_ATTEMPTS)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(10);
        let handle = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new(9, None, None, None, None))
            .await
            .unwrap();

        drop(tx);
        // Worker must survive the failure and exit cleanly on queue close.
        handle.await.unwrap();
    }
}
