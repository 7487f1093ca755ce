//! Error types for Career Pilot.

use uuid::Uuid;

use crate::tasks::model::{TaskStatus, TaskType};

/// Top-level error type for the agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Task store errors.
///
/// `InvalidTransition` is a programmer error: task status only moves
/// forward (pending → in_progress → completed | failed) and an attempt to
/// move it any other way must fail loudly, never be swallowed.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Task {id} not found")]
    NotFound { id: Uuid },

    #[error("Task {id} cannot transition from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: TaskStatus,
        to: TaskStatus,
    },
}

/// Worker execution errors.
///
/// A worker error marks its task permanently failed with no retry, so
/// workers reserve `Err` for genuinely exceptional conditions and return
/// degenerate results for expected "no data" cases.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("{reason}")]
    ExecutionFailed { task_type: TaskType, reason: String },

    #[error("no worker registered for {task_type}")]
    NoWorker { task_type: TaskType },
}

/// Remote job-search errors — internal to the job-matching worker's
/// primary path and always absorbed by its fallback.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search credentials not configured")]
    MissingCredentials,

    #[error("Search request failed: {0}")]
    Http(String),

    #[error("Search API returned status {code}")]
    Status { code: u16 },

    #[error("Failed to decode search response: {0}")]
    Decode(String),
}

/// Result type alias for the agent.
pub type Result<T> = std::result::Result<T, Error>;
