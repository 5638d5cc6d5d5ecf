use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careersync_api::config::Config;
use careersync_api::db::{create_pool, run_migrations};
use careersync_api::identity::{GoTrueVerifier, TokenVerifier};
use careersync_api::routes::build_router;
use careersync_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerSync API v{}", env!("CARGO_PKG_VERSION"));

    // Database pool and schema
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Identity provider client
    let verifier: Arc<dyn TokenVerifier> = Arc::new(GoTrueVerifier::new(
        config.identity_url.clone(),
        config.identity_api_key.clone(),
    ));
    info!("Identity verifier initialized ({})", config.identity_url);

    let state = AppState { db, verifier };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
