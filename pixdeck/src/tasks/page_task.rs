//! src/tasks/page_task.rs
//! ============================================================================
//! # Page Task: cancellable fetch of one grid page
//!
//! Runs a [`PageRequest`] against the image source and reports the outcome
//! tagged with the request's generation. A cancelled request reports nothing;
//! the grid has already moved on to a newer query.

use std::sync::Arc;

use stockr::ImageSource;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::model::grid_state::{PageOutcome, PageRequest};

pub fn spawn_page_fetch(
    source: Arc<dyn ImageSource>,
    request: PageRequest,
    cancel: CancellationToken,
    task_tx: mpsc::UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    info!(
        "Spawning page fetch: page {} of {:?} (generation {})",
        request.page, request.query, request.generation
    );

    tokio::spawn(async move {
        let fetched = tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!(
                    "Page {} for {:?} cancelled",
                    request.page, request.query
                );
                return;
            }

            result = source.fetch_page(&request.query, request.page, request.per_page) => result,
        };

        let outcome = match fetched {
            Ok(records) => PageOutcome::Loaded(records),
            Err(e) => {
                warn!("Error fetching images: {}", e);
                PageOutcome::Failed(AppError::from(e).user_message())
            }
        };

        let result = TaskResult::Page {
            generation: request.generation,
            page: request.page,
            outcome,
        };
        if let Err(e) = task_tx.send(result) {
            warn!("Failed to send page result: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{FakeSource, records};
    use stockr::ProviderError;

    fn request(generation: u64, page: u32) -> PageRequest {
        PageRequest {
            generation,
            query: "mountains".into(),
            page,
            per_page: 12,
        }
    }

    #[tokio::test]
    async fn reports_loaded_page_with_generation() {
        let source = Arc::new(FakeSource::with_pages(vec![Ok(records("m", 4))]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_page_fetch(source.clone(), request(7, 1), CancellationToken::new(), tx)
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            TaskResult::Page {
                generation,
                page,
                outcome: PageOutcome::Loaded(list),
            } => {
                assert_eq!(generation, 7);
                assert_eq!(page, 1);
                assert_eq!(list.len(), 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(source.calls(), vec![("mountains".to_string(), 1)]);
    }

    #[tokio::test]
    async fn failure_is_reported_as_failed_outcome() {
        let source = Arc::new(FakeSource::with_pages(vec![Err(ProviderError::MissingAccessKey)]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_page_fetch(source, request(1, 2), CancellationToken::new(), tx)
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            TaskResult::Page {
                outcome: PageOutcome::Failed(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn cancelled_fetch_reports_nothing() {
        let source = Arc::new(FakeSource::with_pages(vec![Ok(records("m", 4))]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        spawn_page_fetch(source, request(1, 1), cancel, tx)
            .await
            .unwrap();

        assert!(rx.recv().await.is_none());
    }
}
