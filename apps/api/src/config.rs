use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PHOTO_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a remote photo fetch, connect included.
    pub photo_fetch_timeout: Duration,
    /// Largest photo payload accepted, inline or remote.
    pub photo_max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            photo_fetch_timeout: Duration::from_secs(10),
            photo_max_bytes: DEFAULT_PHOTO_MAX_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            photo_fetch_timeout: Duration::from_secs(parse_env(
                "PHOTO_FETCH_TIMEOUT_SECS",
                defaults.photo_fetch_timeout.as_secs(),
            )?),
            photo_max_bytes: parse_env("PHOTO_MAX_BYTES", defaults.photo_max_bytes)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
