use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Base URL of the identity provider (GoTrue-style userinfo endpoint)
    pub identity_url: String,
    /// Project API key sent alongside every identity provider call
    pub identity_api_key: String,
    /// Port for the HTTP server
    pub port: u16,
    /// Log level filter applied when RUST_LOG is not set
    pub rust_log: String,
}

impl Config {
    /// Loads configuration from environment variables.
    /// Reads `.env` file if present (via dotenvy).
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (ignore errors if it doesn't)
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            identity_url: require_env("IDENTITY_URL")?,
            identity_api_key: require_env("IDENTITY_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
