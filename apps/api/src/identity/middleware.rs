use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::identity::storage::upsert_user;
use crate::state::AppState;

/// The authenticated caller, injected into request extensions by
/// [`require_auth`] and read back out by handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
/// The scheme matches case-insensitively; an empty token is no token.
pub fn bearer_token(value: Option<&str>) -> Option<&str> {
    let (scheme, token) = value?.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Bearer middleware for protected routes.
///
/// Verifies the token with the identity provider, mirrors the user into the
/// local `users` table so foreign keys always have a target, and injects
/// [`AuthUser`] into request extensions. Anything short of a verified token
/// is a 401 before any handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header_value).ok_or(AppError::Unauthorized)?;

    let identity = state.verifier.verify(token).await?;
    upsert_user(&state.db, &identity).await?;

    req.extensions_mut().insert(AuthUser {
        id: identity.id,
        email: identity.email,
    });

    Ok(next.run(req).await)
}
