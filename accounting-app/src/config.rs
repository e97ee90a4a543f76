//! Configuration loading from environment.

use std::env;

/// Application configuration, read once at process start.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Rate-provider access credential. Optional on purpose: a missing key
    /// is reported per conversion request, never as a startup crash.
    pub fixer_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://accounting.db".to_string());

        let fixer_key = env::var("FIXER_KEY").ok();

        Ok(Self {
            port,
            database_url,
            fixer_key,
        })
    }
}
