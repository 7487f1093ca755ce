//! Autopilot orchestrator — task seeding, dispatch loop, insight publication.
//!
//! The orchestrator owns the task and insight stores and runs a single
//! polling loop: each tick it claims every due pending task, dispatches
//! each to the worker registered for its type, and turns successful
//! results into insights. Worker failures are isolated — a failing task
//! is recorded and the loop moves on; there is no retry and no circuit
//! breaker.
//!
//! One orchestrator per embedding process; construct it explicitly and
//! drive it with `start`/`stop`. There is no ambient singleton.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::PilotConfig;
use crate::error::WorkerError;
use crate::insights::derive::{derive_insights, progress_summary};
use crate::insights::model::Insight;
use crate::insights::store::InsightStore;
use crate::profile::UserProfile;
use crate::status::{StatusReporter, StatusSnapshot};
use crate::tasks::model::{Task, TaskPayload, TaskPriority, TaskType};
use crate::tasks::store::TaskStore;
use crate::workers::WorkerRegistry;

/// The autopilot orchestrator.
pub struct Orchestrator {
    config: PilotConfig,
    workers: Arc<WorkerRegistry>,
    tasks: Arc<TaskStore>,
    insights: Arc<InsightStore>,
    reporter: StatusReporter,
    running: Arc<AtomicBool>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Orchestrator {
    /// Create a stopped orchestrator with fresh stores.
    pub fn new(config: PilotConfig, workers: Arc<WorkerRegistry>) -> Self {
        let tasks = Arc::new(TaskStore::new());
        let insights = Arc::new(InsightStore::new(config.max_insights));
        let reporter = StatusReporter::new(Arc::clone(&tasks), Arc::clone(&insights));

        Self {
            config,
            workers,
            tasks,
            insights,
            reporter,
            running: Arc::new(AtomicBool::new(false)),
            loop_handle: Mutex::new(None),
        }
    }

    /// Start autonomous mode for the given profile.
    ///
    /// Seeds one task per domain with staggered due times, then spawns the
    /// dispatch loop. Calling `start` while already running is a no-op.
    pub async fn start(self: &Arc<Self>, profile: UserProfile) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("start() called while already running, ignoring");
            return;
        }

        self.seed_initial_tasks(&profile).await;

        let handle = tokio::spawn(run_loop(Arc::clone(self)));
        *self.loop_handle.lock().await = Some(handle);

        info!(
            cycle = ?self.config.cycle_interval,
            "Autopilot started"
        );
    }

    /// Stop autonomous mode.
    ///
    /// Cooperative: the loop exits after its current iteration and
    /// in-flight dispatches are allowed to finish. No new cycle begins.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.loop_handle.lock().await.take();
        info!("Autopilot stopping after current cycle");
    }

    /// Whether the dispatch loop is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Task counts for the presentation layer.
    pub async fn status(&self) -> StatusSnapshot {
        self.reporter.status().await
    }

    /// Most recent insights, newest first.
    pub async fn recent_insights(&self, limit: Option<usize>) -> Vec<Insight> {
        self.reporter.recent_insights(limit).await
    }

    /// A read-side handle usable independently of the orchestrator.
    pub fn reporter(&self) -> StatusReporter {
        self.reporter.clone()
    }

    /// The underlying task store (read access for embedders and tests).
    pub fn task_store(&self) -> &Arc<TaskStore> {
        &self.tasks
    }

    /// The underlying insight store.
    pub fn insight_store(&self) -> &Arc<InsightStore> {
        &self.insights
    }

    /// Run one dispatch cycle at `now`: claim every due pending task and
    /// dispatch all claims concurrently. The loop calls this once per
    /// tick; tests call it directly for deterministic cycles.
    pub async fn run_cycle(&self, now: DateTime<Utc>) {
        let due = self.tasks.claim_due(now).await;
        if due.is_empty() {
            return;
        }

        debug!(count = due.len(), "Dispatching due tasks");
        let dispatches = due.into_iter().map(|task| self.dispatch(task));
        futures::future::join_all(dispatches).await;
    }

    /// Publish a milestone summary when anything completed within the
    /// trailing summary window.
    pub async fn maybe_publish_summary(&self, now: DateTime<Utc>) {
        let window = chrono::Duration::from_std(self.config.summary_window)
            .unwrap_or_else(|_| chrono::Duration::seconds(300));
        let completed = self.tasks.completed_since(now - window).await;

        if completed > 0 {
            self.insights
                .push(progress_summary(completed, self.config.summary_window))
                .await;
        }
    }

    async fn seed_initial_tasks(&self, profile: &UserProfile) {
        let now = Utc::now();
        let stagger = chrono::Duration::from_std(self.config.stagger)
            .unwrap_or_else(|_| chrono::Duration::seconds(5));

        for (i, task_type) in TaskType::ALL.into_iter().enumerate() {
            let payload = TaskPayload {
                operation: task_type.default_operation().to_string(),
                profile: profile.clone(),
            };
            let task = Task::new(
                task_type,
                seed_priority(task_type),
                now + stagger * (i as i32 + 1),
                payload,
            );

            debug!(
                task_id = %task.id,
                task_type = %task_type,
                scheduled_for = %task.scheduled_for,
                "Seeded task"
            );
            self.tasks.add(task).await;
        }
    }

    async fn dispatch(&self, task: Task) {
        let Some(worker) = self.workers.get(task.task_type) else {
            let err = WorkerError::NoWorker {
                task_type: task.task_type,
            };
            error!(task_id = %task.id, task_type = %task.task_type, "No worker registered");
            if let Err(record_err) = self.tasks.fail(task.id, err.to_string()).await {
                error!(task_id = %task.id, "Failed to record dispatch failure: {}", record_err);
            }
            return;
        };

        match worker.execute(&task.payload).await {
            Ok(result) => {
                let insights = derive_insights(task.task_type, &result);
                if let Err(e) = self.tasks.complete(task.id, result).await {
                    error!(task_id = %task.id, "Failed to record completion: {}", e);
                    return;
                }

                let count = insights.len();
                for insight in insights {
                    self.insights.push(insight).await;
                }
                info!(
                    task_id = %task.id,
                    task_type = %task.task_type,
                    insights = count,
                    "Task completed"
                );
            }
            Err(e) => {
                warn!(task_id = %task.id, task_type = %task.task_type, "Task failed: {}", e);
                if let Err(record_err) = self.tasks.fail(task.id, e.to_string()).await {
                    error!(task_id = %task.id, "Failed to record task failure: {}", record_err);
                }
            }
        }
    }
}

/// Seed priority per domain. Advisory only; dispatch order is by due time.
fn seed_priority(task_type: TaskType) -> TaskPriority {
    match task_type {
        TaskType::ResumeOptimization | TaskType::JobMatching => TaskPriority::High,
        TaskType::CareerPlanning | TaskType::SkillsAnalysis => TaskPriority::Medium,
        TaskType::Networking => TaskPriority::Low,
    }
}

/// The dispatch loop: tick, scan, dispatch, occasionally summarize.
async fn run_loop(pilot: Arc<Orchestrator>) {
    let mut ticker = tokio::time::interval(pilot.config.cycle_interval);
    // Skip immediate first tick
    ticker.tick().await;

    let mut last_summary = tokio::time::Instant::now();

    loop {
        ticker.tick().await;
        if !pilot.running.load(Ordering::SeqCst) {
            break;
        }

        pilot.run_cycle(Utc::now()).await;

        if last_summary.elapsed() >= pilot.config.summary_interval {
            pilot.maybe_publish_summary(Utc::now()).await;
            last_summary = tokio::time::Instant::now();
        }
    }

    info!("Autopilot dispatch loop stopped");
}
