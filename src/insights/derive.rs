//! Result-to-insight interpretation rules.
//!
//! Derivation is defensive across the board: worker results are opaque
//! JSON, and a missing or mistyped field yields no insights from that
//! fragment rather than an error, so one malformed result can never take
//! down a dispatch cycle.

use std::time::Duration;

use serde_json::Value;

use super::model::{Insight, InsightKind, InsightPriority};
use crate::tasks::model::TaskType;

/// Interpret a completed task's result into zero or more insights.
pub fn derive_insights(task_type: TaskType, result: &Value) -> Vec<Insight> {
    match task_type {
        TaskType::JobMatching => from_job_matching(result),
        TaskType::ResumeOptimization => from_resume_optimization(result),
        TaskType::SkillsAnalysis => from_skills_analysis(result),
        TaskType::CareerPlanning => from_career_planning(result),
        TaskType::Networking => from_networking(result),
    }
}

/// The periodic progress-summary insight. Has no owning task.
pub fn progress_summary(completed: usize, window: Duration) -> Insight {
    let minutes = (window.as_secs() / 60).max(1);
    let plural = if completed == 1 { "task" } else { "tasks" };
    Insight::new(
        InsightKind::Milestone,
        "Autopilot progress",
        format!("Completed {completed} analysis {plural} in the last {minutes} minutes"),
    )
    .with_data(serde_json::json!({ "completed": completed }))
}

fn from_job_matching(result: &Value) -> Vec<Insight> {
    let Some(opportunities) = result.get("opportunities").and_then(Value::as_array) else {
        return Vec::new();
    };

    opportunities
        .iter()
        .filter_map(|entry| {
            let title = entry.get("title").and_then(Value::as_str)?;
            let company = entry
                .get("company")
                .and_then(Value::as_str)
                .unwrap_or("an unnamed company");
            let score = entry.get("match").and_then(Value::as_f64).unwrap_or(0.0);

            let priority = if score > 90.0 {
                InsightPriority::High
            } else if score > 70.0 {
                InsightPriority::Medium
            } else {
                InsightPriority::Low
            };

            Some(
                Insight::new(
                    InsightKind::Opportunity,
                    format!("Job match: {title}"),
                    format!("{title} at {company} ({score:.0}% match)"),
                )
                .with_priority(priority)
                .with_action_required(score > 80.0)
                .with_data(entry.clone()),
            )
        })
        .collect()
}

fn from_resume_optimization(result: &Value) -> Vec<Insight> {
    let Some(suggestions) = result.get("suggestions").and_then(Value::as_array) else {
        return Vec::new();
    };

    suggestions
        .iter()
        .filter_map(|entry| {
            let text = entry.get("suggestion").and_then(Value::as_str)?;
            let section = entry
                .get("section")
                .and_then(Value::as_str)
                .unwrap_or("resume");

            let priority = match entry.get("impact").and_then(Value::as_str) {
                Some("high") => InsightPriority::High,
                Some("medium") => InsightPriority::Medium,
                _ => InsightPriority::Low,
            };

            Some(
                Insight::new(
                    InsightKind::Recommendation,
                    format!("Improve your {section} section"),
                    text,
                )
                .with_priority(priority)
                .with_action_required(priority == InsightPriority::High)
                .with_data(entry.clone()),
            )
        })
        .collect()
}

fn from_skills_analysis(result: &Value) -> Vec<Insight> {
    let Some(gaps) = result.get("gaps").and_then(Value::as_array) else {
        return Vec::new();
    };

    gaps.iter()
        .filter_map(|entry| {
            let skill = entry.get("skill").and_then(Value::as_str)?;
            let severe = entry.get("severity").and_then(Value::as_str) == Some("high");

            let insight = if severe {
                Insight::new(
                    InsightKind::Alert,
                    format!("Skill gap: {skill}"),
                    format!("{skill} is in high demand for your target role and missing from your profile"),
                )
                .with_priority(InsightPriority::High)
                .with_action_required(true)
            } else {
                Insight::new(
                    InsightKind::Recommendation,
                    format!("Consider learning {skill}"),
                    format!("{skill} would strengthen your profile for your target role"),
                )
                .with_priority(InsightPriority::Medium)
            };

            Some(insight.with_data(entry.clone()))
        })
        .collect()
}

fn from_career_planning(result: &Value) -> Vec<Insight> {
    let Some(recommendations) = result.get("recommendations").and_then(Value::as_array) else {
        return Vec::new();
    };

    recommendations
        .iter()
        .filter_map(Value::as_str)
        .map(|text| {
            Insight::new(InsightKind::Recommendation, "Career move to consider", text)
                .with_priority(InsightPriority::Medium)
        })
        .collect()
}

fn from_networking(result: &Value) -> Vec<Insight> {
    let Some(events) = result.get("events").and_then(Value::as_array) else {
        return Vec::new();
    };

    events
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name").and_then(Value::as_str)?;
            let relevance = entry.get("relevance").and_then(Value::as_f64).unwrap_or(0.0);

            let priority = if relevance > 70.0 {
                InsightPriority::Medium
            } else {
                InsightPriority::Low
            };

            Some(
                Insight::new(
                    InsightKind::Opportunity,
                    format!("Networking event: {name}"),
                    format!("{name} looks relevant to your focus area"),
                )
                .with_priority(priority)
                .with_data(entry.clone()),
            )
        })
        .collect()
}
