//! Background lookups against the static catalog: the category list at
//! startup and debounced search suggestions.

use std::sync::Arc;

use stockr::ImageSource;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::controller::event_loop::TaskResult;

pub fn spawn_category_load(
    source: Arc<dyn ImageSource>,
    task_tx: mpsc::UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        let result = source.categories().await.map_err(|e| e.to_string());
        if let Err(e) = task_tx.send(TaskResult::Categories(result)) {
            warn!("Failed to send categories: {}", e);
        }
    });
}

/// Results carry the text they were computed for so late answers can be dropped
pub fn spawn_suggestion_lookup(
    source: Arc<dyn ImageSource>,
    query: String,
    task_tx: mpsc::UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        debug!("Looking up suggestions for {:?}", query);
        let suggestions = match source.suggestions(&query).await {
            Ok(list) => list,
            Err(e) => {
                warn!("Suggestion lookup for {:?} failed: {}", query, e);
                Vec::new()
            }
        };

        let _ = task_tx.send(TaskResult::Suggestions { query, suggestions });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::FakeSource;

    #[tokio::test]
    async fn categories_arrive_as_task_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_category_load(Arc::new(FakeSource::default()), tx);

        match rx.recv().await.unwrap() {
            TaskResult::Categories(Ok(list)) => assert_eq!(list.len(), 8),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn suggestions_are_tagged_with_their_query() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_suggestion_lookup(Arc::new(FakeSource::default()), "NATURE".into(), tx);

        match rx.recv().await.unwrap() {
            TaskResult::Suggestions { query, suggestions } => {
                assert_eq!(query, "NATURE");
                assert_eq!(suggestions, vec!["nature landscape".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
