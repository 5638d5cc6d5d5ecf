use axum::{extract::State, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{AppPath, AppQuery};
use crate::models::opportunity::Opportunity;
use crate::opportunities::filters::OpportunityFilters;
use crate::opportunities::storage;
use crate::state::AppState;

/// GET /api/opportunities
/// Public catalog browse with optional type/location/search filters and
/// paging. See [`OpportunityFilters`] for the sentinel handling.
pub async fn list_opportunities(
    State(state): State<AppState>,
    AppQuery(filters): AppQuery<OpportunityFilters>,
) -> Result<Json<Vec<Opportunity>>, AppError> {
    let query = filters.normalize()?;
    let opportunities = storage::list_opportunities(&state.db, &query).await?;
    Ok(Json(opportunities))
}

/// GET /api/opportunities/:id
pub async fn get_opportunity(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Opportunity>, AppError> {
    let opportunity = storage::get_opportunity(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Opportunity not found".to_string()))?;

    Ok(Json(opportunity))
}
