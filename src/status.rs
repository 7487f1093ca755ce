//! Read-side status queries for the presentation layer.
//!
//! Pure: no mutation, no side effects, safe to call at any time —
//! including while the orchestrator is stopped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::insights::model::Insight;
use crate::insights::store::InsightStore;
use crate::tasks::store::TaskStore;

/// Default number of insights returned when no limit is given.
pub const DEFAULT_INSIGHT_LIMIT: usize = 10;

/// External task-count snapshot.
///
/// Claimed-but-unfinished tasks count as `pending` here: to the consumer
/// a task is either done, dead, or still owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub failed: usize,
}

/// Pure queries over the task and insight stores.
#[derive(Clone)]
pub struct StatusReporter {
    tasks: Arc<TaskStore>,
    insights: Arc<InsightStore>,
}

impl StatusReporter {
    pub fn new(tasks: Arc<TaskStore>, insights: Arc<InsightStore>) -> Self {
        Self { tasks, insights }
    }

    /// Current task counts.
    pub async fn status(&self) -> StatusSnapshot {
        let counts = self.tasks.counts().await;
        StatusSnapshot {
            total: counts.total,
            completed: counts.completed,
            pending: counts.pending + counts.in_progress,
            failed: counts.failed,
        }
    }

    /// The most recent insights, newest first.
    pub async fn recent_insights(&self, limit: Option<usize>) -> Vec<Insight> {
        self.insights
            .recent(limit.unwrap_or(DEFAULT_INSIGHT_LIMIT))
            .await
    }
}
