use std::sync::Arc;

use sqlx::PgPool;

use crate::identity::TokenVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: PgPool,
    /// Bearer token verifier. Production wires `GoTrueVerifier`; tests swap
    /// in a stub.
    pub verifier: Arc<dyn TokenVerifier>,
}
