use axum::{extract::State, Json};
use serde::Deserialize;

use crate::dashboard::storage::{self, DashboardStats};
use crate::errors::AppError;
use crate::extractors::AppQuery;
use crate::identity::middleware::AuthUser;
use crate::models::application::ApplicationWithOpportunity;
use crate::models::opportunity::Opportunity;
use crate::opportunities::storage as opportunity_storage;
use crate::state::AppState;

const DEFAULT_DEADLINE_LIMIT: i64 = 5;
const DEFAULT_RECOMMENDED_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

impl LimitQuery {
    /// Applies the endpoint default; zero and negative values fall back too.
    fn limit_or(&self, default: i64) -> i64 {
        self.limit.filter(|n| *n > 0).unwrap_or(default)
    }
}

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = storage::user_stats(&state.db, &user.id).await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/deadlines
pub async fn deadlines(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<ApplicationWithOpportunity>>, AppError> {
    let limit = params.limit_or(DEFAULT_DEADLINE_LIMIT);
    let rows = storage::upcoming_deadlines(&state.db, &user.id, limit).await?;
    Ok(Json(rows))
}

/// GET /api/dashboard/recommended
pub async fn recommended(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<Opportunity>>, AppError> {
    let limit = params.limit_or(DEFAULT_RECOMMENDED_LIMIT);
    let rows = opportunity_storage::recommended_opportunities(&state.db, &user.id, limit).await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_apply_to_missing_zero_and_negative() {
        assert_eq!(LimitQuery { limit: None }.limit_or(5), 5);
        assert_eq!(LimitQuery { limit: Some(0) }.limit_or(5), 5);
        assert_eq!(LimitQuery { limit: Some(-3) }.limit_or(10), 10);
        assert_eq!(LimitQuery { limit: Some(7) }.limit_or(5), 7);
    }
}
