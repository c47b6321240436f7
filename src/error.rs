//! Error types for the gateway
//!
//! Upstream failure kinds and the client-facing error responses they map to.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::Language;

// == Upstream Error Enum ==
/// Ways a call to the metadata provider can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The call did not complete within the configured bound
    #[error("Upstream request timed out")]
    Timeout,

    /// Transport failure or a non-success status from the provider
    #[error("Upstream connection error: {0}")]
    Connection(String),

    /// The body parsed but lacks an expected field
    #[error("Upstream response missing '{missing_field}' field")]
    Schema { missing_field: &'static str },

    /// Anything else, malformed JSON included
    #[error("Unexpected upstream error: {0}")]
    Unexpected(String),
}

impl UpstreamError {
    /// HTTP status this failure is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Connection(_) => StatusCode::BAD_GATEWAY,
            UpstreamError::Schema { .. } | UpstreamError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == Endpoint ==
/// The public endpoint an upstream failure surfaced through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Trending,
    Search { query: String },
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Trending => write!(f, "trending"),
            Endpoint::Search { query } => write!(f, "search for '{}'", query),
        }
    }
}

// == Api Error Enum ==
/// Every error a public endpoint can answer with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The query string could not be decoded, e.g. a repeated parameter
    #[error("Invalid query string: {0}")]
    BadQuery(String),

    /// `lang` is not one of the supported tags
    #[error("Language not supported: {0}")]
    InvalidLanguage(String),

    /// `q` missing or blank
    #[error("Search query is required")]
    MissingQuery,

    /// `q` shorter than the minimum after trimming
    #[error("Search query must be at least 2 characters (got {length})")]
    QueryTooShort { length: usize },

    /// The upstream call failed
    #[error("{endpoint} failed: {source}")]
    Upstream {
        endpoint: Endpoint,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn upstream(endpoint: Endpoint, source: UpstreamError) -> Self {
        ApiError::Upstream { endpoint, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadQuery(_)
            | ApiError::InvalidLanguage(_)
            | ApiError::MissingQuery
            | ApiError::QueryTooShort { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { source, .. } => source.status(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadQuery(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::BadQuery(details) => json!({
                "error": "Invalid query string",
                "details": details,
            }),
            ApiError::InvalidLanguage(_) => json!({
                "error": "Language not supported",
                "supported_languages": Language::supported_tags(),
            }),
            ApiError::MissingQuery => json!({
                "error": "Search query is required",
                "example": "/api/search?q=inception",
            }),
            ApiError::QueryTooShort { length } => json!({
                "error": "Search query must be at least 2 characters",
                "query_length": length,
            }),
            ApiError::Upstream { endpoint, source } => upstream_body(endpoint, source),
        };

        (status, Json(body)).into_response()
    }
}

fn upstream_body(endpoint: &Endpoint, source: &UpstreamError) -> serde_json::Value {
    match (endpoint, source) {
        (Endpoint::Trending, UpstreamError::Timeout) => json!({
            "error": "TMDB API timeout. Please try again.",
            "tip": "The request took too long to complete",
        }),
        (Endpoint::Search { query }, UpstreamError::Timeout) => json!({
            "error": "Search timeout. Please try again.",
            "query": query,
        }),
        (Endpoint::Trending, UpstreamError::Connection(details)) => json!({
            "error": "Could not fetch trending content",
            "details": details,
        }),
        (Endpoint::Search { .. }, UpstreamError::Connection(details)) => json!({
            "error": "Search service unavailable",
            "details": details,
        }),
        (Endpoint::Trending, UpstreamError::Schema { missing_field }) => json!({
            "error": "Invalid API response from TMDB",
            "details": format!("Missing '{}' field", missing_field),
        }),
        (Endpoint::Search { .. }, UpstreamError::Schema { missing_field }) => json!({
            "error": "Invalid search response",
            "details": format!("Missing '{}' field", missing_field),
        }),
        (Endpoint::Trending, UpstreamError::Unexpected(_)) => json!({
            "error": "Internal server error",
            "request_id": diagnostic_id(),
        }),
        (Endpoint::Search { .. }, UpstreamError::Unexpected(_)) => json!({
            "error": "Internal server error during search",
            "request_id": diagnostic_id(),
        }),
    }
}

// == Diagnostic Id ==
static DIAGNOSTIC_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Best-effort 8 hex character correlation token for unexpected failures.
///
/// Not guaranteed unique.
pub fn diagnostic_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = DIAGNOSTIC_COUNTER.fetch_add(1, Ordering::Relaxed);
    let hash = RandomState::new().hash_one((nanos, seq));
    format!("{:016x}", hash)[..8].to_string()
}

// == Result Type Alias ==
/// Convenience Result type for the gateway handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_mapping() {
        assert_eq!(UpstreamError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            UpstreamError::Connection("refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            UpstreamError::Schema { missing_field: "results" }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UpstreamError::Unexpected("bad json".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(ApiError::MissingQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::QueryTooShort { length: 1 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidLanguage("xx-XX".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadQuery("duplicate field `q`".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_schema_body_names_missing_field() {
        let body = upstream_body(
            &Endpoint::Trending,
            &UpstreamError::Schema { missing_field: "results" },
        );
        assert_eq!(body["details"], "Missing 'results' field");
    }

    #[test]
    fn test_search_timeout_body_echoes_query() {
        let body = upstream_body(
            &Endpoint::Search { query: "dune".into() },
            &UpstreamError::Timeout,
        );
        assert_eq!(body["query"], "dune");
        assert!(body["error"].as_str().unwrap().contains("timeout"));
    }

    #[test]
    fn test_diagnostic_id_shape() {
        let id = diagnostic_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
