use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Academic and professional profile, one row per user.
/// `completion_percentage` is derived server-side on every save; client
/// values are never trusted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: String,
    pub gpa: Option<f64>,
    pub major: Option<String>,
    pub university: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub resume_url: Option<String>,
    pub transcript_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub bio: Option<String>,
    pub completion_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
