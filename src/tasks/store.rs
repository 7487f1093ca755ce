//! In-memory task store.
//!
//! Tasks accumulate for the lifetime of the orchestrator — there is no
//! retention policy and no retry transition. Claiming due tasks happens
//! under a single write lock, which is what guarantees at-most-once
//! dispatch: a task returned by one claim scan is already `in_progress`
//! before any other scan can observe it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::model::{Task, TaskStatus};
use crate::error::TaskError;

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

/// In-memory collection of tasks.
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Append a fully-formed task.
    pub async fn add(&self, task: Task) {
        self.tasks.write().await.push(task);
    }

    /// Claim every due pending task: transition it to `in_progress` and
    /// return a clone for dispatch. One write lock covers the whole scan.
    pub async fn claim_due(&self, now: DateTime<Utc>) -> Vec<Task> {
        let mut tasks = self.tasks.write().await;
        let mut claimed = Vec::new();

        for task in tasks.iter_mut() {
            if task.is_due(now) {
                task.status = TaskStatus::InProgress;
                debug!(task_id = %task.id, task_type = %task.task_type, "Claimed task");
                claimed.push(task.clone());
            }
        }

        claimed
    }

    /// Record a successful result and mark the task completed.
    pub async fn complete(&self, id: Uuid, result: serde_json::Value) -> Result<(), TaskError> {
        self.finish(id, TaskStatus::Completed, |task| {
            task.result = Some(result);
        })
        .await
    }

    /// Record a failure message and mark the task failed.
    pub async fn fail(&self, id: Uuid, error: impl Into<String>) -> Result<(), TaskError> {
        let message = error.into();
        self.finish(id, TaskStatus::Failed, |task| {
            task.error = Some(message);
        })
        .await
    }

    async fn finish(
        &self,
        id: Uuid,
        to: TaskStatus,
        apply: impl FnOnce(&mut Task),
    ) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound { id })?;

        if !task.status.can_transition_to(to) {
            return Err(TaskError::InvalidTransition {
                id,
                from: task.status,
                to,
            });
        }

        task.status = to;
        task.completed_at = Some(Utc::now());
        apply(task);
        Ok(())
    }

    /// Get a task by id.
    pub async fn get(&self, id: Uuid) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Snapshot of every task, in insertion order.
    pub async fn all(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Task counts by status.
    pub async fn counts(&self) -> StatusCounts {
        let tasks = self.tasks.read().await;
        let mut counts = StatusCounts {
            total: tasks.len(),
            ..Default::default()
        };

        for task in tasks.iter() {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Failed => counts.failed += 1,
            }
        }

        counts
    }

    /// Number of tasks that completed successfully at or after `cutoff`.
    pub async fn completed_since(&self, cutoff: DateTime<Utc>) -> usize {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|t| {
                t.status == TaskStatus::Completed
                    && t.completed_at.is_some_and(|at| at >= cutoff)
            })
            .count()
    }

    /// Total number of tasks ever added.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
