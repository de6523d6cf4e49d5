//! Request and response bodies for the PEARL backend
//!
//! The backend is loose about optional fields, so almost everything here
//! has a serde default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub user: User,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub requires_verification: bool,
    #[serde(default)]
    pub requires_onboarding: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub step: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub onboarding: OnboardingProgress,
}

/// Answers collected by the onboarding flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRequest {
    pub primary_career_goal: String,
    pub target_role: String,
    #[serde(default = "default_current_status")]
    pub current_status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_time_availability")]
    pub time_availability: String,
    #[serde(default = "default_learning_preference")]
    pub learning_preference: String,
    #[serde(default)]
    pub short_term_goal: Option<String>,
    #[serde(default)]
    pub constraint_free_only: bool,
    #[serde(default)]
    pub constraint_heavy_workload: bool,
    #[serde(default)]
    pub confidence_baseline: Option<u8>,
}

fn default_current_status() -> String {
    "student".to_string()
}

fn default_time_availability() -> String {
    "5-10 hours/week".to_string()
}

fn default_learning_preference() -> String {
    "mixed".to_string()
}

impl OnboardingRequest {
    pub fn new(goal: impl Into<String>, target_role: impl Into<String>) -> Self {
        Self {
            primary_career_goal: goal.into(),
            target_role: target_role.into(),
            current_status: default_current_status(),
            skills: Vec::new(),
            time_availability: default_time_availability(),
            learning_preference: default_learning_preference(),
            short_term_goal: None,
            constraint_free_only: false,
            constraint_heavy_workload: false,
            confidence_baseline: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, alias = "skill_name")]
    pub name: String,
    #[serde(default, alias = "proficiency_level")]
    pub level: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default, alias = "match_percentage")]
    pub match_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<JobListing>,
    #[serde(default)]
    pub matched_jobs: Vec<MatchedJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MatchedJob {
    pub job: JobListing,
    #[serde(default)]
    pub match_percentage: Option<f64>,
}

impl JobsResponse {
    /// Flatten either response shape into listings
    pub fn into_listings(self) -> Vec<JobListing> {
        if !self.jobs.is_empty() {
            return self.jobs;
        }
        self.matched_jobs
            .into_iter()
            .map(|m| JobListing {
                match_score: m.match_percentage.or(m.job.match_score),
                ..m.job
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyRequest {
    pub goal: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub skills_to_learn: Vec<String>,
    #[serde(default)]
    pub total_modules: u32,
    #[serde(default)]
    pub estimated_hours: f64,
}

/// Body of `POST /api/analytics/track`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    pub event_type: String,
    pub content_type: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}
