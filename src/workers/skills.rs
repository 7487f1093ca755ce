//! Skills-gap worker — profile skills against a simulated demand table.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::Worker;
use crate::error::WorkerError;
use crate::tasks::model::{TaskPayload, TaskType};

/// Demanded skills per target-role keyword.
const ROLE_DEMAND: &[(&str, &[&str])] = &[
    ("engineer", &["rust", "kubernetes", "sql", "system design"]),
    ("developer", &["rust", "kubernetes", "sql", "system design"]),
    ("data", &["python", "sql", "dbt", "statistics"]),
    ("designer", &["figma", "prototyping", "user research"]),
    ("manager", &["roadmapping", "stakeholder management", "analytics"]),
];

const DEFAULT_DEMAND: &[&str] = &["communication", "sql", "cloud fundamentals"];

const TRENDING: &[&str] = &["ai tooling", "prompt engineering", "observability"];

pub struct SkillsAnalysisWorker {
    latency: Duration,
}

impl SkillsAnalysisWorker {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Worker for SkillsAnalysisWorker {
    fn task_type(&self) -> TaskType {
        TaskType::SkillsAnalysis
    }

    async fn execute(&self, payload: &TaskPayload) -> Result<Value, WorkerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let profile = &payload.profile;
        let have: Vec<String> = profile
            .skill_names()
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let demanded = demand_for(profile.target_role.as_deref());

        // First two missing skills are the ones worth alerting on.
        let gaps: Vec<Value> = demanded
            .iter()
            .filter(|skill| !have.iter().any(|h| h == *skill))
            .enumerate()
            .map(|(i, skill)| {
                json!({
                    "skill": skill,
                    "severity": if i < 2 { "high" } else { "medium" },
                })
            })
            .collect();

        let strengths: Vec<Value> = profile
            .skills
            .iter()
            .filter(|s| demanded.iter().any(|d| d.eq_ignore_ascii_case(&s.name)))
            .map(|s| {
                json!({
                    "skill": s.name,
                    "level": s.level,
                })
            })
            .collect();

        let trending: Vec<&str> = TRENDING
            .iter()
            .filter(|t| !have.iter().any(|h| h == *t))
            .copied()
            .collect();

        Ok(json!({
            "operation": payload.operation,
            "gaps": gaps,
            "strengths": strengths,
            "trending": trending,
        }))
    }
}

fn demand_for(target_role: Option<&str>) -> Vec<&'static str> {
    let Some(role) = target_role else {
        return DEFAULT_DEMAND.to_vec();
    };
    let role = role.to_lowercase();

    ROLE_DEMAND
        .iter()
        .find(|(keyword, _)| role.contains(keyword))
        .map(|(_, skills)| skills.to_vec())
        .unwrap_or_else(|| DEFAULT_DEMAND.to_vec())
}
