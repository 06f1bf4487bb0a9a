//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use chrono_tz::Tz;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Time zone used when a request does not name one
    pub default_timezone: Tz,
    /// Generation time (seconds) above which a slow-report warning is logged
    pub slow_report_secs: u64,
    /// Maximum entries accepted per request
    pub max_entries: usize,
    /// Distinct training days at which aggregation switches to the rayon pool
    pub parallel_min_days: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timezone_name = env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let default_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::Invalid("DEFAULT_TIMEZONE", timezone_name.clone()))?;

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            default_timezone,
            slow_report_secs: parse_var("SLOW_REPORT_SECS", 5)?,
            max_entries: parse_var("MAX_ENTRIES", 100_000)?,
            parallel_min_days: parse_var("PARALLEL_MIN_DAYS", 64)?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            default_timezone: chrono_tz::UTC,
            slow_report_secs: 5,
            max_entries: 10_000,
            parallel_min_days: 64,
        }
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
