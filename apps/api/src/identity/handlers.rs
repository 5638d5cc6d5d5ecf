use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::identity::middleware::AuthUser;
use crate::identity::storage;
use crate::models::user::User;
use crate::state::AppState;

/// GET /api/auth/user
/// Returns the mirrored user record for the authenticated caller.
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    let record = storage::get_user(&state.db, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(record))
}
