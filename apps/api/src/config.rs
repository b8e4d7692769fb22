use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the service starts with no configuration
/// at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on résumés per scoring request. TF-IDF cost grows with
    /// the corpus, so requests are capped before the engine runs.
    pub max_resumes: usize,
    /// Upper bound on a single résumé document, in bytes.
    pub max_document_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_resumes: env_or("MATCHER_MAX_RESUMES", "100")
                .parse::<usize>()
                .context("MATCHER_MAX_RESUMES must be a non-negative integer")?,
            max_document_bytes: env_or("MATCHER_MAX_DOCUMENT_BYTES", "2000000")
                .parse::<usize>()
                .context("MATCHER_MAX_DOCUMENT_BYTES must be a non-negative integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
