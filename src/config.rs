//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::upstream::DEFAULT_BASE_URL;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB API credential
    pub tmdb_api_key: String,
    /// TMDB API base URL
    pub tmdb_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Enables debug-level logging
    pub debug: bool,
    /// Deployment environment reported by the health endpoint
    pub environment: String,
    /// How long a cached upstream result stays fresh
    pub cache_ttl: Duration,
    /// Bound on content requests to TMDB
    pub upstream_timeout: Duration,
    /// Bound on the health probe
    pub health_timeout: Duration,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY` - TMDB credential (default: empty)
    /// - `TMDB_BASE_URL` - TMDB base URL (default: https://api.themoviedb.org/3)
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `APP_DEBUG` - Debug logging, `true`/`1`/`yes` (default: false)
    /// - `APP_ENV` - Environment name (default: production)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 600)
    /// - `UPSTREAM_TIMEOUT` - Content request timeout in seconds (default: 10)
    /// - `HEALTH_TIMEOUT` - Health probe timeout in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or_default(),
            tmdb_base_url: env::var("TMDB_BASE_URL").unwrap_or(defaults.tmdb_base_url),
            server_port: env_or("PORT", defaults.server_port),
            debug: env_flag("APP_DEBUG"),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            cache_ttl: Duration::from_secs(env_or("CACHE_TTL", defaults.cache_ttl.as_secs())),
            upstream_timeout: Duration::from_secs(env_or(
                "UPSTREAM_TIMEOUT",
                defaults.upstream_timeout.as_secs(),
            )),
            health_timeout: Duration::from_secs(env_or(
                "HEALTH_TIMEOUT",
                defaults.health_timeout.as_secs(),
            )),
        }
    }

    /// Whether a TMDB credential is configured.
    pub fn has_api_key(&self) -> bool {
        !self.tmdb_api_key.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            tmdb_base_url: DEFAULT_BASE_URL.to_string(),
            server_port: 5000,
            debug: false,
            environment: "production".to_string(),
            cache_ttl: Duration::from_secs(600),
            upstream_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
        }
    }
}
