//! Resume-optimization worker — simulated ATS scoring and suggestions.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::{Value, json};

use super::Worker;
use crate::error::WorkerError;
use crate::tasks::model::{TaskPayload, TaskType};

pub struct ResumeOptimizationWorker {
    latency: Duration,
}

impl ResumeOptimizationWorker {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Worker for ResumeOptimizationWorker {
    fn task_type(&self) -> TaskType {
        TaskType::ResumeOptimization
    }

    async fn execute(&self, payload: &TaskPayload) -> Result<Value, WorkerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let profile = &payload.profile;
        let mut suggestions = Vec::new();
        let mut score: i64 = 55;

        if profile.skills.is_empty() {
            suggestions.push(json!({
                "section": "skills",
                "suggestion": "List at least five skills relevant to your target role",
                "impact": "high",
            }));
        } else {
            score += 10;
        }

        if profile.work_experience.is_empty() {
            suggestions.push(json!({
                "section": "experience",
                "suggestion": "Add your most recent roles with measurable outcomes",
                "impact": "high",
            }));
        } else {
            score += 15;
            let thin_entries = profile
                .work_experience
                .iter()
                .filter(|w| w.highlights.is_empty())
                .count();
            if thin_entries > 0 {
                suggestions.push(json!({
                    "section": "experience",
                    "suggestion": format!(
                        "Add achievement bullet points to {thin_entries} role(s) that have none"
                    ),
                    "impact": "medium",
                }));
            } else {
                score += 5;
            }
        }

        if profile.education.is_empty() {
            suggestions.push(json!({
                "section": "education",
                "suggestion": "Add your education history, even a single entry",
                "impact": "low",
            }));
        } else {
            score += 10;
        }

        if profile.personal.title.is_none() {
            suggestions.push(json!({
                "section": "summary",
                "suggestion": "Add a headline that names your target role",
                "impact": "medium",
            }));
        } else {
            score += 5;
        }

        // Small jitter keeps repeated scans from looking frozen in the UI.
        score += rand::thread_rng().gen_range(0..5);

        Ok(json!({
            "operation": payload.operation,
            "ats_score": score.min(100),
            "suggestions": suggestions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Education, PersonalInfo, Skill, UserProfile, WorkExperience};

    fn payload(profile: UserProfile) -> TaskPayload {
        TaskPayload {
            operation: "ats_optimization".to_string(),
            profile,
        }
    }

    fn full_profile() -> UserProfile {
        UserProfile {
            personal: PersonalInfo {
                title: Some("Senior Developer".to_string()),
                ..Default::default()
            },
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: Some("expert".to_string()),
            }],
            work_experience: vec![WorkExperience {
                company: Some("Acme".to_string()),
                role: Some("Developer".to_string()),
                highlights: vec!["Shipped the thing".to_string()],
            }],
            education: vec![Education::default()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn complete_profile_scores_high_with_no_suggestions() {
        let worker = ResumeOptimizationWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(full_profile())).await.unwrap();

        assert!(result["suggestions"].as_array().unwrap().is_empty());
        // 55 + 10 + 15 + 5 + 10 + 5 already exceeds the cap before jitter.
        assert_eq!(result["ats_score"].as_i64().unwrap(), 100);
    }

    #[tokio::test]
    async fn empty_profile_gets_suggestions_not_errors() {
        let worker = ResumeOptimizationWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(UserProfile::default())).await.unwrap();

        let suggestions = result["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions.iter().any(|s| s["impact"] == "high"));
        assert!(result["ats_score"].as_i64().unwrap() < 70);
    }

    #[tokio::test]
    async fn thin_experience_entries_flagged() {
        let worker = ResumeOptimizationWorker::new(Duration::ZERO);
        let mut profile = full_profile();
        profile.work_experience.push(WorkExperience::default());

        let result = worker.execute(&payload(profile)).await.unwrap();
        let suggestions = result["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0]["section"], "experience");
        assert_eq!(suggestions[0]["impact"], "medium");
    }
}
