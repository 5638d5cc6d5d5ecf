//! Identity boundary.
//!
//! Token verification is delegated to an external GoTrue-style provider;
//! this module owns the HTTP client that calls it, the bearer middleware
//! that guards protected routes, and the local mirror of provider users.

pub mod handlers;
pub mod middleware;
pub mod storage;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;

const USERINFO_PATH: &str = "/auth/v1/user";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Identity resolved from a bearer token by the provider. Extra fields in
/// the provider payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedIdentity {
    pub id: String,
    pub email: Option<String>,
}

/// The token verification seam, carried in `AppState` as
/// `Arc<dyn TokenVerifier>` so tests can substitute a stub.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolves a bearer token to the identity it belongs to, or
    /// `AppError::Unauthorized` when the provider rejects it.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AppError>;
}

/// Verifier backed by a GoTrue-style `GET /auth/v1/user` userinfo endpoint.
///
/// Every failure mode surfaces as `Unauthorized`: a token we cannot verify
/// is a token we do not accept. Provider outages are logged before being
/// collapsed into the same answer.
#[derive(Clone)]
pub struct GoTrueVerifier {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoTrueVerifier {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TokenVerifier for GoTrueVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AppError> {
        let url = format!("{}{}", self.base_url, USERINFO_PATH);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider unreachable: {e}");
                AppError::Unauthorized
            })?;

        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                warn!("Identity provider returned {status}");
            } else {
                debug!("Identity provider rejected token ({status})");
            }
            return Err(AppError::Unauthorized);
        }

        let identity: VerifiedIdentity = response.json().await.map_err(|e| {
            warn!("Identity provider returned an unparseable user payload: {e}");
            AppError::Unauthorized
        })?;

        Ok(identity)
    }
}
