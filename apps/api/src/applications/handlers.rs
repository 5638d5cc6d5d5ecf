use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::applications::storage;
use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::identity::middleware::AuthUser;
use crate::models::application::{Application, ApplicationStatus, ApplicationWithOpportunity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub opportunity_id: Uuid,
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0, max = 100))]
    pub completion_percentage: Option<i32>,
}

/// Partial update. Nullable columns distinguish "clear this" (explicit JSON
/// null, the inner `None`) from "leave unchanged" (field absent, the outer
/// `None`).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub applied_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub interview_date: Option<Option<DateTime<Utc>>>,
    #[validate(range(min = 0, max = 100))]
    pub completion_percentage: Option<i32>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<ApplicationStatus>,
}

/// GET /api/applications
/// Lists the caller's applications, newest activity first. `?status=` narrows
/// to one lifecycle stage.
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ListApplicationsQuery>,
) -> Result<Json<Vec<ApplicationWithOpportunity>>, AppError> {
    let applications = storage::list_applications(&state.db, &user.id, params.status).await?;
    Ok(Json(applications))
}

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    input.validate()?;
    let created = storage::create_application(&state.db, &user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<UpdateApplicationRequest>,
) -> Result<Json<Application>, AppError> {
    input.validate()?;
    let updated = storage::update_application(&state.db, &user.id, id, &input).await?;
    Ok(Json(updated))
}

/// DELETE /api/applications/:id
/// Idempotent: deleting an application that is already gone (or was never
/// the caller's) still answers 204.
pub async fn delete_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = storage::delete_application(&state.db, &user.id, id).await?;
    if deleted == 0 {
        tracing::debug!("Delete matched no application {id} for user {}", user.id);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let cleared: UpdateApplicationRequest =
            serde_json::from_value(json!({"notes": null})).unwrap();
        assert_eq!(cleared.notes, Some(None));

        let untouched: UpdateApplicationRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(untouched.notes, None);

        let set: UpdateApplicationRequest =
            serde_json::from_value(json!({"notes": "call back friday"})).unwrap();
        assert_eq!(set.notes, Some(Some("call back friday".to_string())));
    }

    #[test]
    fn test_update_request_parses_status_and_dates() {
        let input: UpdateApplicationRequest = serde_json::from_value(json!({
            "status": "interview",
            "interviewDate": "2026-09-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(input.status, Some(ApplicationStatus::Interview));
        assert!(matches!(input.interview_date, Some(Some(_))));
    }

    #[test]
    fn test_completion_percentage_must_stay_in_range() {
        let over = UpdateApplicationRequest {
            completion_percentage: Some(150),
            ..Default::default()
        };
        assert!(over.validate().is_err());

        let under = UpdateApplicationRequest {
            completion_percentage: Some(-10),
            ..Default::default()
        };
        assert!(under.validate().is_err());

        let ok = UpdateApplicationRequest {
            completion_percentage: Some(100),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_create_request_requires_opportunity_id() {
        let missing = serde_json::from_value::<CreateApplicationRequest>(json!({
            "status": "saved"
        }));
        assert!(missing.is_err());

        let ok: CreateApplicationRequest = serde_json::from_value(json!({
            "opportunityId": "5f4e8c2a-1d3b-4f6a-9c8e-2b7d5a1e3f60"
        }))
        .unwrap();
        assert!(ok.status.is_none());
    }

    #[test]
    fn test_list_query_rejects_unknown_status() {
        assert!(serde_json::from_value::<ListApplicationsQuery>(json!({"status": "archived"})).is_err());
    }
}
