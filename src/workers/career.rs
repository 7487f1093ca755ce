//! Career-planning worker — simulated market outlook and next-step advice.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::{Value, json};

use super::Worker;
use crate::error::WorkerError;
use crate::tasks::model::{TaskPayload, TaskType};

pub struct CareerPlanningWorker {
    latency: Duration,
}

impl CareerPlanningWorker {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Worker for CareerPlanningWorker {
    fn task_type(&self) -> TaskType {
        TaskType::CareerPlanning
    }

    async fn execute(&self, payload: &TaskPayload) -> Result<Value, WorkerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let profile = &payload.profile;
        let mut recommendations = Vec::new();

        if let Some(role) = &profile.target_role {
            recommendations.push(format!(
                "Compare the skills most requested in {role} postings against your profile"
            ));
        }
        if profile.work_experience.len() >= 2 {
            recommendations.push(
                "Ask a peer to review how your two most recent roles read together".to_string(),
            );
        }
        if profile.work_experience.is_empty() && !profile.skills.is_empty() {
            recommendations
                .push("Add project work that demonstrates your listed skills".to_string());
        }

        // No profile signal at all: degenerate result, not an error.
        let market_outlook = if profile.is_blank() {
            Value::Null
        } else {
            let mut rng = rand::thread_rng();
            let trend = ["stable", "growing", "hot"][rng.gen_range(0..3)];
            json!({
                "demand_index": rng.gen_range(55..95),
                "trend": trend,
            })
        };

        Ok(json!({
            "operation": payload.operation,
            "recommendations": recommendations,
            "market_outlook": market_outlook,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Skill, UserProfile, WorkExperience};

    fn payload(profile: UserProfile) -> TaskPayload {
        TaskPayload {
            operation: "daily_analysis".to_string(),
            profile,
        }
    }

    #[tokio::test]
    async fn target_role_drives_recommendations() {
        let worker = CareerPlanningWorker::new(Duration::ZERO);
        let profile = UserProfile {
            target_role: Some("Backend Engineer".to_string()),
            work_experience: vec![WorkExperience::default(), WorkExperience::default()],
            ..Default::default()
        };

        let result = worker.execute(&payload(profile)).await.unwrap();
        let recommendations = result["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations[0].as_str().unwrap().contains("Backend Engineer"));
        assert!(result["market_outlook"].is_object());
    }

    #[tokio::test]
    async fn blank_profile_degrades_gracefully() {
        let worker = CareerPlanningWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(UserProfile::default())).await.unwrap();
        assert!(result["recommendations"].as_array().unwrap().is_empty());
        assert!(result["market_outlook"].is_null());
    }

    #[tokio::test]
    async fn sequential_calls_are_independent() {
        let worker = CareerPlanningWorker::new(Duration::ZERO);
        let profile = UserProfile {
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: None,
            }],
            ..Default::default()
        };

        let first = worker.execute(&payload(profile.clone())).await.unwrap();
        let second = worker.execute(&payload(profile)).await.unwrap();
        assert_eq!(first["recommendations"], second["recommendations"]);
    }
}
