use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness check; answers without touching the database or the identity
/// provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "careersync-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
