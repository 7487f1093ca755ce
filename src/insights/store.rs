//! Bounded, newest-first insight store.

use std::collections::VecDeque;

use tokio::sync::RwLock;
use tracing::debug;

use super::model::Insight;

/// In-memory insight store with bounded retention.
///
/// Newest insights sit at the front; once the store exceeds its cap the
/// oldest entries are dropped. Insights are never mutated after insertion.
pub struct InsightStore {
    insights: RwLock<VecDeque<Insight>>,
    cap: usize,
}

impl InsightStore {
    /// Create a store retaining at most `cap` insights.
    pub fn new(cap: usize) -> Self {
        Self {
            insights: RwLock::new(VecDeque::new()),
            cap,
        }
    }

    /// Insert at the front, evicting the oldest entries beyond the cap.
    pub async fn push(&self, insight: Insight) {
        debug!(
            insight_id = %insight.id,
            kind = %insight.kind,
            title = %insight.title,
            "New insight"
        );

        let mut insights = self.insights.write().await;
        insights.push_front(insight);
        insights.truncate(self.cap);
    }

    /// The `limit` most recent insights, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<Insight> {
        self.insights
            .read()
            .await
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of retained insights.
    pub async fn len(&self) -> usize {
        self.insights.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.insights.read().await.is_empty()
    }
}
