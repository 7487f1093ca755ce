//! Networking worker — simulated events and contact suggestions.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::{Value, json};

use super::Worker;
use crate::error::WorkerError;
use crate::tasks::model::{TaskPayload, TaskType};

pub struct NetworkingWorker {
    latency: Duration,
}

impl NetworkingWorker {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Worker for NetworkingWorker {
    fn task_type(&self) -> TaskType {
        TaskType::Networking
    }

    async fn execute(&self, payload: &TaskPayload) -> Result<Value, WorkerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let profile = &payload.profile;
        let focus = profile
            .target_industry
            .clone()
            .or_else(|| profile.target_role.clone())
            .or_else(|| profile.skills.first().map(|s| s.name.clone()));

        // No focus area to scan for: empty result, not an error.
        let events = match &focus {
            Some(topic) => {
                let mut rng = rand::thread_rng();
                vec![
                    json!({
                        "name": format!("{topic} Meetup"),
                        "format": "in_person",
                        "relevance": rng.gen_range(50..95),
                    }),
                    json!({
                        "name": format!("{topic} Virtual Summit"),
                        "format": "virtual",
                        "relevance": rng.gen_range(50..95),
                    }),
                ]
            }
            None => Vec::new(),
        };

        let suggested_contacts: Vec<Value> = profile
            .work_experience
            .iter()
            .filter_map(|w| w.company.as_ref())
            .take(3)
            .map(|company| {
                json!({
                    "company": company,
                    "reason": format!("Former colleagues at {company}"),
                })
            })
            .collect();

        Ok(json!({
            "operation": payload.operation,
            "events": events,
            "suggested_contacts": suggested_contacts,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Skill, UserProfile, WorkExperience};

    fn payload(profile: UserProfile) -> TaskPayload {
        TaskPayload {
            operation: "event_scan".to_string(),
            profile,
        }
    }

    #[tokio::test]
    async fn focus_area_drives_events() {
        let profile = UserProfile {
            target_industry: Some("Fintech".to_string()),
            work_experience: vec![
                WorkExperience {
                    company: Some("Acme".to_string()),
                    ..Default::default()
                },
                WorkExperience::default(),
            ],
            ..Default::default()
        };

        let worker = NetworkingWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(profile)).await.unwrap();

        let events = result["events"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0]["name"].as_str().unwrap().contains("Fintech"));
        let relevance = events[0]["relevance"].as_u64().unwrap();
        assert!((50..95).contains(&(relevance as i64)));

        // Entries without a company are skipped.
        let contacts = result["suggested_contacts"].as_array().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0]["company"], "Acme");
    }

    #[tokio::test]
    async fn first_skill_is_fallback_focus() {
        let profile = UserProfile {
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: None,
            }],
            ..Default::default()
        };

        let worker = NetworkingWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(profile)).await.unwrap();
        assert!(result["events"][0]["name"].as_str().unwrap().contains("Rust"));
    }

    #[tokio::test]
    async fn blank_profile_yields_empty_scan() {
        let worker = NetworkingWorker::new(Duration::ZERO);
        let result = worker.execute(&payload(UserProfile::default())).await.unwrap();
        assert!(result["events"].as_array().unwrap().is_empty());
        assert!(result["suggested_contacts"].as_array().unwrap().is_empty());
    }
}
