//! Background worker persisting click events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::LinkRepository;

/// Consumes click events from the channel and persists them.
///
/// Each event becomes a click row plus a last-accessed touch on the link.
/// Inserts are retried a few times with backoff; an event that still fails is
/// logged and dropped. Nothing here can affect an already-emitted redirect.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn LinkRepository>,
) {
    while let Some(event) = rx.recv().await {
        let click = NewClick {
            code: event.code.clone(),
            clicked_at: event.clicked_at,
            user_agent: event.user_agent.clone(),
            country: event.country.clone(),
        };

        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);
        let insert = Retry::spawn(strategy, || repository.record_click(click.clone())).await;

        if let Err(e) = insert {
            warn!("Dropping click for {}: {}", event.code, e);
            continue;
        }

        if let Err(e) = repository.touch_last_accessed(&event.code).await {
            warn!("Failed to touch last-accessed for {}: {}", event.code, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_worker_persists_click_and_touches_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_click()
            .withf(|click| click.code == "abc" && click.country.as_deref() == Some("US"))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_touch_last_accessed()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        tx.send(ClickEvent::new("abc".to_string(), Some("UA"), Some("US")))
            .await
            .unwrap();
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_failed_insert() {
        let mut repo = MockLinkRepository::new();
        let mut attempts = 0;
        repo.expect_record_click().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(AppError::internal("Database error", serde_json::json!({})))
            } else {
                Ok(())
            }
        });
        repo.expect_touch_last_accessed()
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        tx.send(ClickEvent::new("retry".to_string(), None, None))
            .await
            .unwrap();
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_drops_event_after_exhausted_retries() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_click()
            .times(4)
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));
        repo.expect_touch_last_accessed().times(0);

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        tx.send(ClickEvent::new("doomed".to_string(), None, None))
            .await
            .unwrap();
        drop(tx);

        worker.await.unwrap();
    }
}
