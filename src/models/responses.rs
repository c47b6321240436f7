//! Response DTOs for the gateway API
//!
//! Defines the bodies of the informational endpoints. Content endpoints
//! answer with bare JSON arrays and errors are built in `crate::error`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;

/// Application name reported by `/` and `/api/health`.
pub const APP_NAME: &str = "FlickFinder Gateway";

/// Response body for the welcome endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
    /// Endpoint name to example URL
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl InfoResponse {
    pub fn new() -> Self {
        Self {
            message: format!("{} is running", APP_NAME),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: BTreeMap::from([
                ("trending", "/api/trending?lang=en-US"),
                ("search", "/api/search?q=query&lang=en-US"),
                ("health", "/api/health"),
            ]),
        }
    }
}

impl Default for InfoResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Reachability of an upstream service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// "up" or "down"
    pub status: String,
    /// Seconds the probe took, when it got an answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    /// Transport error, when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    pub fn is_up(&self) -> bool {
        self.status == "up"
    }

    /// True when the probe never got an HTTP answer.
    pub fn is_unreachable(&self) -> bool {
        self.error.is_some()
    }
}

/// Cache section of the health report
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    /// Approximate footprint, formatted in KB
    pub memory_usage: String,
}

impl CacheReport {
    pub fn new(stats: &CacheStats, memory_bytes: usize) -> Self {
        Self {
            entries: stats.total_entries,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            memory_usage: format!("{:.2} KB", memory_bytes as f64 / 1024.0),
        }
    }
}

/// Application section of the health report
#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when an upstream service is unreachable
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub services: BTreeMap<&'static str, ServiceStatus>,
    pub cache: CacheReport,
    pub app: AppInfo,
}

impl HealthResponse {
    pub fn new(tmdb: ServiceStatus, cache: CacheReport, environment: impl Into<String>) -> Self {
        let status = if tmdb.is_unreachable() {
            "degraded"
        } else {
            "healthy"
        };
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            services: BTreeMap::from([("tmdb", tmdb)]),
            cache,
            app: AppInfo {
                name: APP_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: environment.into(),
            },
        }
    }
}

/// Response body for unknown paths
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub path: String,
    pub available_endpoints: Vec<&'static str>,
}

impl NotFoundResponse {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            error: "Endpoint not found".to_string(),
            path: path.into(),
            available_endpoints: vec!["/api/trending", "/api/search", "/api/health"],
        }
    }
}

/// Methods every route answers; all endpoints are read-only.
pub const ALLOWED_METHODS: [&str; 2] = ["GET", "HEAD"];

/// Response body for known paths hit with an unsupported method
#[derive(Debug, Clone, Serialize)]
pub struct MethodNotAllowedResponse {
    pub error: String,
    pub method: String,
    pub path: String,
    pub allowed_methods: Vec<&'static str>,
}

impl MethodNotAllowedResponse {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error: "Method not allowed".to_string(),
            method: method.into(),
            path: path.into(),
            allowed_methods: ALLOWED_METHODS.to_vec(),
        }
    }
}
