//! Domain workers — the pluggable per-domain analysis capability.
//!
//! Each worker implements one contract: `execute(payload) -> result`.
//! The built-in workers simulate their domain with artificial latency and
//! fabricated data; a real implementation slots in behind the same trait
//! without touching the orchestrator.
//!
//! Workers are stateless with respect to the orchestrator: they receive a
//! payload and return a result, holding no cross-call state beyond
//! intentional randomness.

pub mod career;
pub mod jobs;
pub mod networking;
pub mod resume;
pub mod skills;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::WorkerError;
use crate::tasks::model::{TaskPayload, TaskType};

pub use career::CareerPlanningWorker;
pub use jobs::{JobListing, JobMatchingWorker, JobSearch, RemoteJobSearch, SearchQuery};
pub use networking::NetworkingWorker;
pub use resume::ResumeOptimizationWorker;
pub use skills::SkillsAnalysisWorker;

/// A domain worker.
///
/// `execute` must not fail for expected "no data" conditions; it returns
/// an empty or degenerate result instead. An `Err` marks the task
/// permanently failed with no retry.
#[async_trait]
pub trait Worker: Send + Sync {
    /// The task type this worker handles.
    fn task_type(&self) -> TaskType;

    /// Run the domain analysis for one task payload.
    async fn execute(&self, payload: &TaskPayload) -> Result<serde_json::Value, WorkerError>;
}

/// Registry mapping task types to their workers.
///
/// Fixed at construction; the orchestrator looks workers up by task type
/// on every dispatch.
pub struct WorkerRegistry {
    workers: HashMap<TaskType, Arc<dyn Worker>>,
}

impl WorkerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            workers: HashMap::new(),
        }
    }

    /// Registry with the five built-in workers, each simulating `latency`.
    ///
    /// The job-matching worker picks up remote search credentials from the
    /// environment when present and otherwise runs on its fallback path.
    pub fn with_defaults(latency: Duration) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CareerPlanningWorker::new(latency)));
        registry.register(Arc::new(ResumeOptimizationWorker::new(latency)));
        registry.register(Arc::new(JobMatchingWorker::from_env(latency)));
        registry.register(Arc::new(SkillsAnalysisWorker::new(latency)));
        registry.register(Arc::new(NetworkingWorker::new(latency)));
        registry
    }

    /// Register a worker under its task type, replacing any previous one.
    pub fn register(&mut self, worker: Arc<dyn Worker>) {
        let task_type = worker.task_type();
        tracing::debug!(task_type = %task_type, "Registered worker");
        self.workers.insert(task_type, worker);
    }

    /// Look up the worker for a task type.
    pub fn get(&self, task_type: TaskType) -> Option<Arc<dyn Worker>> {
        self.workers.get(&task_type).cloned()
    }

    /// Number of registered workers.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

impl Default for WorkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
