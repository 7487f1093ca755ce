//! Job-matching worker — remote search with a deterministic fallback.
//!
//! The primary path queries a remote job-search API. Any failure there —
//! missing credentials, network error, bad status, undecodable body — is
//! logged and absorbed: the worker falls back to deterministic mock
//! listings scored against the profile instead of propagating the error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::Worker;
use crate::error::{SearchError, WorkerError};
use crate::profile::UserProfile;
use crate::tasks::model::{TaskPayload, TaskType};

/// Query sent to a job-search backend.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub role: Option<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
}

/// One job listing returned by a search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Skill keywords the listing asks for; drives match scoring.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A job-search backend.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>, SearchError>;
}

/// Reqwest-backed search client.
pub struct RemoteJobSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl RemoteJobSearch {
    pub fn new(endpoint: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Build a client from `CAREER_PILOT_SEARCH_URL` / `CAREER_PILOT_SEARCH_KEY`.
    pub fn from_env() -> Result<Self, SearchError> {
        let endpoint =
            std::env::var("CAREER_PILOT_SEARCH_URL").map_err(|_| SearchError::MissingCredentials)?;
        let api_key =
            std::env::var("CAREER_PILOT_SEARCH_KEY").map_err(|_| SearchError::MissingCredentials)?;
        Ok(Self::new(endpoint, SecretString::from(api_key)))
    }
}

#[async_trait]
impl JobSearch for RemoteJobSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(query)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json::<Vec<JobListing>>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// The job-matching worker.
pub struct JobMatchingWorker {
    latency: Duration,
    search: Option<Arc<dyn JobSearch>>,
}

impl JobMatchingWorker {
    /// Offline worker: fallback listings only.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            search: None,
        }
    }

    /// Worker with an injected search backend.
    pub fn with_search(latency: Duration, search: Arc<dyn JobSearch>) -> Self {
        Self {
            latency,
            search: Some(search),
        }
    }

    /// Worker using the remote backend when credentials are configured,
    /// the fallback path otherwise.
    pub fn from_env(latency: Duration) -> Self {
        match RemoteJobSearch::from_env() {
            Ok(remote) => Self::with_search(latency, Arc::new(remote)),
            Err(_) => {
                debug!("Remote job search not configured, using fallback listings");
                Self::new(latency)
            }
        }
    }
}

#[async_trait]
impl Worker for JobMatchingWorker {
    fn task_type(&self) -> TaskType {
        TaskType::JobMatching
    }

    async fn execute(&self, payload: &TaskPayload) -> Result<Value, WorkerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let profile = &payload.profile;
        let query = SearchQuery {
            role: profile.target_role.clone().or_else(|| profile.personal.title.clone()),
            skills: profile.skill_names(),
            location: profile.personal.location.clone(),
        };

        let remote = match &self.search {
            Some(search) => match search.search(&query).await {
                Ok(listings) => Some(listings),
                Err(e) => {
                    warn!(error = %e, "Remote job search failed, using fallback listings");
                    None
                }
            },
            None => None,
        };

        let (listings, source) = match remote {
            Some(listings) => (listings, "remote"),
            None => (fallback_listings(profile), "fallback"),
        };

        let skills = profile.skill_names();
        let opportunities: Vec<Value> = listings
            .iter()
            .map(|listing| {
                json!({
                    "title": listing.title,
                    "company": listing.company,
                    "location": listing.location,
                    "tags": listing.tags,
                    "match": match_score(listing, &skills),
                    "url": listing.url,
                })
            })
            .collect();

        Ok(json!({
            "operation": payload.operation,
            "opportunities": opportunities,
            "source": source,
        }))
    }
}

/// Deterministic substitute listings built from the profile alone.
fn fallback_listings(profile: &UserProfile) -> Vec<JobListing> {
    let role = profile
        .target_role
        .clone()
        .or_else(|| profile.personal.title.clone())
        .unwrap_or_else(|| "Software Engineer".to_string());

    let skills: Vec<String> = profile
        .skill_names()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    vec![
        JobListing {
            title: format!("Senior {role}"),
            company: "Northwind Labs".to_string(),
            location: Some("Remote".to_string()),
            tags: skills.clone(),
            url: None,
        },
        JobListing {
            title: role.clone(),
            company: "Atlas Systems".to_string(),
            location: profile.personal.location.clone(),
            tags: skills.iter().take(1).cloned().collect(),
            url: None,
        },
        JobListing {
            title: format!("{role} (Contract)"),
            company: "Brightline".to_string(),
            location: Some("Remote".to_string()),
            tags: skills.iter().take(2).cloned().collect(),
            url: None,
        },
        JobListing {
            title: format!("Lead {role}"),
            company: "Veridian".to_string(),
            location: None,
            tags: Vec::new(),
            url: None,
        },
    ]
}

/// Skill-overlap score in 0..=100.
fn match_score(listing: &JobListing, skills: &[String]) -> u32 {
    if skills.is_empty() {
        return 50;
    }

    let hits = listing
        .tags
        .iter()
        .filter(|tag| skills.iter().any(|s| s.eq_ignore_ascii_case(tag)))
        .count();

    (40 + (hits * 60 / skills.len()) as u32).min(100)
}
