//! Configuration for the Content API service.

use std::time::Duration;

/// Content API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
    /// Request timeout
    pub request_timeout: Duration,
    /// How long a user's tier is cached
    pub tier_cache_ttl: Duration,
    /// Maximum characters accepted for text content
    pub max_content_chars: usize,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let run_migrations = parse_or("RUN_MIGRATIONS", false)?;

        // Server
        let http_port = parse_or("HTTP_PORT", 8080)?;
        let request_timeout_secs: u64 = parse_or("REQUEST_TIMEOUT_SECS", 30)?;

        // Usage gating
        let tier_cache_ttl_secs: u64 = parse_or("TIER_CACHE_TTL_SECS", 60)?;
        let max_content_chars = parse_or("MAX_CONTENT_CHARS", 50_000)?;
        if max_content_chars == 0 {
            return Err(ConfigError::Invalid("MAX_CONTENT_CHARS"));
        }

        // Metrics
        let metrics_enabled = parse_or("METRICS_ENABLED", true)?;

        Ok(Self {
            http_port,
            database_url,
            run_migrations,
            request_timeout: Duration::from_secs(request_timeout_secs),
            tier_cache_ttl: Duration::from_secs(tier_cache_ttl_secs),
            max_content_chars,
            metrics_enabled,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_when_unset() {
        let value: u16 = parse_or("CONTENT_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_or_rejects_malformed_bool() {
        std::env::set_var("CONTENT_API_TEST_BAD_FLAG", "yes");
        let result: Result<bool, _> = parse_or("CONTENT_API_TEST_BAD_FLAG", true);
        assert!(matches!(result, Err(ConfigError::Invalid("CONTENT_API_TEST_BAD_FLAG"))));

        std::env::set_var("CONTENT_API_TEST_GOOD_FLAG", " false ");
        assert!(!parse_or("CONTENT_API_TEST_GOOD_FLAG", true).unwrap());
    }
}
