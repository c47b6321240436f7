//! TMDB API client
//!
//! `MetadataProvider` backed by the TMDB v3 REST API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::MetadataProvider;
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{Language, ServiceStatus};

/// Base URL for the TMDB v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Movie fetched by the health probe
const PROBE_PATH: &str = "movie/550";

/// Client for the TMDB API
#[derive(Debug, Clone)]
pub struct TmdbClient {
    /// Client for content requests
    client: Client,
    /// Client for health probes, with a shorter timeout
    probe_client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Creates a client with explicit timeouts.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            probe_client: Client::builder().timeout(probe_timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.tmdb_base_url.clone(),
            config.tmdb_api_key.clone(),
            config.upstream_timeout,
            config.health_timeout,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `path` and decodes the body as JSON.
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        debug!("GET {}/{}", self.base_url, path);

        let response = self
            .client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let body = response.bytes().await.map_err(transport_error)?;

        serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Unexpected(format!("Malformed JSON response: {}", e)))
    }
}

/// Classifies a reqwest failure.
///
/// The URL is stripped from the message since it carries the API key.
fn transport_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_decode() || err.is_builder() {
        UpstreamError::Unexpected(err.without_url().to_string())
    } else {
        UpstreamError::Connection(err.without_url().to_string())
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn trending(&self, language: Language) -> Result<Value, UpstreamError> {
        self.get_json("trending/all/day", &[("language", language.as_str())])
            .await
    }

    async fn search_multi(
        &self,
        query: &str,
        language: Language,
    ) -> Result<Value, UpstreamError> {
        self.get_json(
            "search/multi",
            &[("query", query), ("language", language.as_str())],
        )
        .await
    }

    async fn probe(&self) -> ServiceStatus {
        let started = Instant::now();
        let result = self
            .probe_client
            .get(self.url(PROBE_PATH))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await;

        match result {
            Ok(response) => {
                let up = response.status().is_success();
                if !up {
                    warn!("TMDB health probe returned {}", response.status());
                }
                ServiceStatus {
                    status: if up { "up" } else { "down" }.to_string(),
                    response_time: Some(started.elapsed().as_secs_f64()),
                    error: None,
                }
            }
            Err(e) => {
                let e = e.without_url();
                warn!("TMDB health probe failed: {}", e);
                ServiceStatus {
                    status: "down".to_string(),
                    response_time: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
