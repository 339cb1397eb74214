use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at startup.
/// Nothing else in the crate reads ambient environment state — the pipeline
/// components receive everything they need at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm_base_url: String,
    pub llm_api_key: String,
    /// Timeout for the profile-extraction inference call.
    pub llm_extract_timeout: Duration,
    /// Timeout for the fit-scoring inference call. Independent of the
    /// extraction timeout: a hung scoring call must never block persistence.
    pub llm_score_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_LLM_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_extract_timeout: timeout_from_env("LLM_EXTRACT_TIMEOUT_SECS", 60)?,
            llm_score_timeout: timeout_from_env("LLM_SCORE_TIMEOUT_SECS", 60)?,
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

fn timeout_from_env(key: &str, default_secs: u64) -> Result<Duration> {
    let secs = match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a number of seconds"))?,
        Err(_) => default_secs,
    };
    Ok(Duration::from_secs(secs))
}
