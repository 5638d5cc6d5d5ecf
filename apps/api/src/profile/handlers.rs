use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::identity::middleware::AuthUser;
use crate::models::profile::UserProfile;
use crate::profile::completion::completion_percentage;
use crate::profile::storage;
use crate::state::AppState;

/// Full profile document as saved by the client. Unknown fields on the
/// wire (including any client-sent `completionPercentage`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    #[validate(range(min = 0.0, max = 10.0))]
    pub gpa: Option<f64>,
    pub major: Option<String>,
    pub university: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    #[validate(url)]
    pub resume_url: Option<String>,
    #[validate(url)]
    pub transcript_url: Option<String>,
    #[validate(url)]
    pub portfolio_url: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    pub bio: Option<String>,
}

/// GET /api/profile
/// Returns `null` rather than 404 when the caller has not saved a profile
/// yet, so first-time users see an empty form instead of an error.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Option<UserProfile>>, AppError> {
    let profile = storage::get_profile(&state.db, &user.id).await?;
    Ok(Json(profile))
}

/// POST /api/profile
/// Replaces the whole document and re-derives the completion percentage.
pub async fn save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<SaveProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    input.validate()?;
    let completion = completion_percentage(&input);
    let profile = storage::save_profile(&state.db, &user.id, &input, completion).await?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_sent_completion_percentage_is_ignored() {
        let input: SaveProfileRequest = serde_json::from_value(json!({
            "completionPercentage": 99,
            "university": "MIT"
        }))
        .unwrap();
        // Only education half-filled: derivation says 0, whatever the client claimed.
        assert_eq!(completion_percentage(&input), 0);
    }

    #[test]
    fn test_gpa_and_graduation_year_are_range_checked() {
        let bad_gpa = SaveProfileRequest {
            gpa: Some(42.0),
            ..Default::default()
        };
        assert!(bad_gpa.validate().is_err());

        let bad_year = SaveProfileRequest {
            graduation_year: Some(1492),
            ..Default::default()
        };
        assert!(bad_year.validate().is_err());

        let ok = SaveProfileRequest {
            gpa: Some(3.8),
            graduation_year: Some(2027),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_profile_links_must_be_urls() {
        let input = SaveProfileRequest {
            github_url: Some("github dot com slash ada".to_string()),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("github_url"));
    }

    #[test]
    fn test_missing_skills_default_to_empty() {
        let input: SaveProfileRequest = serde_json::from_value(json!({})).unwrap();
        assert!(input.skills.is_empty());
    }
}
