//! User profile types consumed by domain workers.
//!
//! The profile is a loose bag: every collection defaults to empty and
//! every scalar is optional. Workers degrade gracefully on missing data
//! (empty results), they never reject a sparse profile.

use serde::{Deserialize, Serialize};

/// A user's career profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    /// Role the user is steering toward, e.g. "Backend Engineer".
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub target_industry: Option<String>,
}

/// Basic identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: Option<String>,
    /// Current professional headline, e.g. "Senior Developer".
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A single skill entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Free-form proficiency label ("beginner", "expert", ...).
    #[serde(default)]
    pub level: Option<String>,
}

/// One work-experience entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Achievement bullet points.
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl UserProfile {
    /// Skill names, in profile order.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }

    /// True when the profile carries no usable signal at all.
    pub fn is_blank(&self) -> bool {
        self.skills.is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.target_role.is_none()
            && self.personal.title.is_none()
    }
}
