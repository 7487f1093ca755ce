//! Task data model and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::UserProfile;

/// The five analysis domains the autopilot schedules work for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    CareerPlanning,
    ResumeOptimization,
    JobMatching,
    SkillsAnalysis,
    Networking,
}

impl TaskType {
    /// Every task type, in seed order.
    pub const ALL: [TaskType; 5] = [
        TaskType::CareerPlanning,
        TaskType::ResumeOptimization,
        TaskType::JobMatching,
        TaskType::SkillsAnalysis,
        TaskType::Networking,
    ];

    /// The operation discriminator the seed tasks carry in their payload.
    pub fn default_operation(&self) -> &'static str {
        match self {
            TaskType::CareerPlanning => "daily_analysis",
            TaskType::ResumeOptimization => "ats_optimization",
            TaskType::JobMatching => "continuous_search",
            TaskType::SkillsAnalysis => "gap_analysis",
            TaskType::Networking => "event_scan",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CareerPlanning => "career_planning",
            Self::ResumeOptimization => "resume_optimization",
            Self::JobMatching => "job_matching",
            Self::SkillsAnalysis => "skills_analysis",
            Self::Networking => "networking",
        };
        write!(f, "{s}")
    }
}

/// Advisory task priority.
///
/// Dispatch order is purely by `scheduled_for`; priority is carried as
/// metadata for the read side and is not consulted when claiming tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting for its due time.
    Pending,
    /// Claimed by a dispatch cycle, worker running.
    InProgress,
    /// Worker returned a result.
    Completed,
    /// Worker failed; terminal, no retry.
    Failed,
}

impl TaskStatus {
    /// Check if this status allows transitioning to another status.
    ///
    /// Status is monotonic: pending → in_progress → {completed, failed}.
    /// Terminal statuses admit no further transitions.
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        use TaskStatus::*;

        matches!(
            (self, target),
            (Pending, InProgress) | (InProgress, Completed) | (InProgress, Failed)
        )
    }

    /// Check if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// The data bag handed to a worker: which operation to run, for whom.
///
/// Opaque to the orchestrator beyond routing by task type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Operation discriminator within the domain, e.g. `ats_optimization`.
    pub operation: String,
    pub profile: UserProfile,
}

/// A unit of scheduled work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Eligible for dispatch once wall-clock time reaches this.
    pub scheduled_for: DateTime<Utc>,
    pub payload: TaskPayload,
    /// Worker-defined result shape; set on success.
    pub result: Option<serde_json::Value>,
    /// Human-readable failure message; set on failure.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task due at `scheduled_for`.
    pub fn new(
        task_type: TaskType,
        priority: TaskPriority,
        scheduled_for: DateTime<Utc>,
        payload: TaskPayload,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type,
            priority,
            status: TaskStatus::Pending,
            scheduled_for,
            payload,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// True when the task is pending and its due time has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Pending && self.scheduled_for <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TaskPayload {
        TaskPayload {
            operation: "daily_analysis".to_string(),
            profile: UserProfile::default(),
        }
    }

    #[test]
    fn status_transitions_valid() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Failed));
    }

    #[test]
    fn status_transitions_invalid() {
        // No skipping in_progress, no moving backward, no leaving a terminal state.
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Failed));
        assert!(!TaskStatus::InProgress.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::InProgress));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Failed));
        assert!(!TaskStatus::Failed.can_transition_to(TaskStatus::Pending));
    }

    #[test]
    fn terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
    }

    #[test]
    fn status_serde_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn task_type_display() {
        assert_eq!(TaskType::ResumeOptimization.to_string(), "resume_optimization");
        assert_eq!(TaskType::JobMatching.to_string(), "job_matching");
    }

    #[test]
    fn task_type_operations() {
        for task_type in TaskType::ALL {
            assert!(!task_type.default_operation().is_empty());
        }
        assert_eq!(TaskType::JobMatching.default_operation(), "continuous_search");
    }

    #[test]
    fn new_task_is_pending() {
        let task = Task::new(
            TaskType::Networking,
            TaskPriority::Low,
            Utc::now(),
            payload(),
        );
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.result.is_none());
        assert!(task.error.is_none());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn due_respects_schedule_and_status() {
        let now = Utc::now();
        let mut task = Task::new(
            TaskType::CareerPlanning,
            TaskPriority::Medium,
            now + chrono::Duration::seconds(10),
            payload(),
        );
        assert!(!task.is_due(now));
        assert!(task.is_due(now + chrono::Duration::seconds(10)));

        task.status = TaskStatus::Completed;
        assert!(!task.is_due(now + chrono::Duration::hours(1)));
    }
}
