//! Insight data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of observation an insight carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something the user could pursue (a job match, an event).
    Opportunity,
    /// A concrete improvement the user should consider.
    Recommendation,
    /// Something that needs attention (a serious skill gap).
    Alert,
    /// Progress marker, e.g. the periodic completion summary.
    Milestone,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Opportunity => "opportunity",
            Self::Recommendation => "recommendation",
            Self::Alert => "alert",
            Self::Milestone => "milestone",
        };
        write!(f, "{s}")
    }
}

/// Display priority of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

/// A derived, user-facing observation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action_required: bool,
    pub priority: InsightPriority,
    pub created_at: DateTime<Utc>,
    /// The originating result fragment, `Null` when there is none
    /// (the periodic summary insight has no owning task).
    pub data: serde_json::Value,
}

impl Insight {
    /// Create a low-priority, no-action insight; adjust with the `with_*`
    /// builders.
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description: description.into(),
            action_required: false,
            priority: InsightPriority::Low,
            created_at: Utc::now(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_priority(mut self, priority: InsightPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_action_required(mut self, action_required: bool) -> Self {
        self.action_required = action_required;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let insight = Insight::new(InsightKind::Opportunity, "title", "desc");
        assert_eq!(insight.priority, InsightPriority::Low);
        assert!(!insight.action_required);
        assert!(insight.data.is_null());
    }

    #[test]
    fn builder_overrides() {
        let insight = Insight::new(InsightKind::Alert, "gap", "missing skill")
            .with_priority(InsightPriority::High)
            .with_action_required(true)
            .with_data(serde_json::json!({"skill": "sql"}));
        assert_eq!(insight.priority, InsightPriority::High);
        assert!(insight.action_required);
        assert_eq!(insight.data["skill"], "sql");
    }

    #[test]
    fn kind_serde_snake_case() {
        let json = serde_json::to_string(&InsightKind::Recommendation).unwrap();
        assert_eq!(json, "\"recommendation\"");
        assert_eq!(InsightKind::Milestone.to_string(), "milestone");
    }
}
