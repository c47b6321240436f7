//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::cache::{CacheKey, CacheStore, CachedFetcher};
use crate::config::Config;
use crate::error::{ApiError, Endpoint, Result};
use crate::models::{
    CacheReport, HealthResponse, InfoResponse, MethodNotAllowedResponse, NotFoundResponse,
    SearchParams, TrendingParams,
};
use crate::upstream::{
    fetch_search, fetch_trending, MetadataProvider, TmdbClient, SEARCH_OPERATION,
    TRENDING_OPERATION,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream metadata source
    pub provider: Arc<dyn MetadataProvider>,
    /// Cache front shared by the content endpoints
    pub fetcher: CachedFetcher,
    /// Freshness window of cached results
    pub cache_ttl: Duration,
    /// Environment name reported by the health endpoint
    pub environment: String,
}

impl AppState {
    /// Creates a new AppState around a provider with an empty cache.
    pub fn new(provider: Arc<dyn MetadataProvider>, cache_ttl: Duration) -> Self {
        Self {
            provider,
            fetcher: CachedFetcher::new(Arc::new(RwLock::new(CacheStore::new()))),
            cache_ttl,
            environment: "production".to_string(),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Creates a new AppState from configuration, backed by TMDB.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        let provider = TmdbClient::from_config(config)?;
        Ok(Self::new(Arc::new(provider), config.cache_ttl).with_environment(&config.environment))
    }

    /// Shared handle to the cache store.
    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        self.fetcher.store()
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<InfoResponse> {
    Json(InfoResponse::new())
}

/// Handler for GET /api/trending
///
/// Returns up to 20 trending items with artwork, cached per language.
pub async fn trending_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<TrendingParams>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(params) = query.inspect_err(|e| warn!("Rejected query string: {}", e))?;
    let language = params.validate().inspect_err(|e| warn!("{}", e))?;

    let key = CacheKey::new(TRENDING_OPERATION).arg("lang", language.as_str());
    let provider = state.provider.clone();

    state
        .fetcher
        .get_or_fetch(key, state.cache_ttl, || async move {
            fetch_trending(provider.as_ref(), language).await
        })
        .await
        .map(Json)
        .map_err(|e| {
            error!("Trending fetch failed: {}", e);
            ApiError::upstream(Endpoint::Trending, e)
        })
}

/// Handler for GET /api/search
///
/// Returns up to 15 movie and TV hits with artwork, cached per query and
/// language.
pub async fn search_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(params) = query.inspect_err(|e| warn!("Rejected query string: {}", e))?;
    let search = params.validate().inspect_err(|e| warn!("{}", e))?;

    let key = CacheKey::new(SEARCH_OPERATION)
        .arg("q", search.query.as_str())
        .arg("lang", search.language.as_str());
    let provider = state.provider.clone();
    let query = search.query.clone();

    state
        .fetcher
        .get_or_fetch(key, state.cache_ttl, || async move {
            fetch_search(provider.as_ref(), &query, search.language).await
        })
        .await
        .map(Json)
        .map_err(|e| {
            error!("Search for '{}' failed: {}", search.query, e);
            ApiError::upstream(
                Endpoint::Search {
                    query: search.query.clone(),
                },
                e,
            )
        })
}

/// Handler for GET /api/health
///
/// Probes TMDB and reports cache usage. Always answers 200.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let tmdb = state.provider.probe().await;

    let cache = {
        let store = state.cache().read().await;
        CacheReport::new(&store.stats(), store.approx_memory_bytes())
    };

    let response = HealthResponse::new(tmdb, cache, state.environment.clone());
    info!("Health check: {}", response.status);
    Json(response)
}

/// Fallback for unknown paths
pub async fn not_found_handler(uri: Uri) -> (StatusCode, Json<NotFoundResponse>) {
    warn!("404 Not Found: {}", uri.path());
    (StatusCode::NOT_FOUND, Json(NotFoundResponse::new(uri.path())))
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed_handler(
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<MethodNotAllowedResponse>) {
    warn!("405 Method Not Allowed: {} {}", method, uri.path());
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowedResponse::new(method.as_str(), uri.path())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::models::{Language, ServiceStatus};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider answering every call with a fixed body and counting calls.
    struct CountingProvider {
        body: std::result::Result<Value, UpstreamError>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(body: std::result::Result<Value, UpstreamError>) -> Arc<Self> {
            Arc::new(Self {
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MetadataProvider for CountingProvider {
        async fn trending(&self, _language: Language) -> std::result::Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone()
        }

        async fn search_multi(
            &self,
            _query: &str,
            _language: Language,
        ) -> std::result::Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone()
        }

        async fn probe(&self) -> ServiceStatus {
            ServiceStatus {
                status: "up".to_string(),
                response_time: Some(0.01),
                error: None,
            }
        }
    }

    fn state(provider: Arc<CountingProvider>) -> AppState {
        AppState::new(provider, Duration::from_secs(600))
    }

    fn hits() -> Value {
        json!({"results": [
            {"id": 1, "media_type": "movie", "poster_path": "/a.jpg"},
            {"id": 2, "media_type": "person", "poster_path": "/b.jpg"},
        ]})
    }

    #[tokio::test]
    async fn test_trending_handler_caches() {
        let provider = CountingProvider::new(Ok(hits()));
        let state = state(provider.clone());

        for _ in 0..2 {
            let Json(value) =
                trending_handler(State(state.clone()), Ok(Query(TrendingParams::default())))
                    .await
                    .unwrap();
            assert_eq!(value.as_array().unwrap().len(), 2);
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_trending_handler_rejects_language_before_upstream() {
        let provider = CountingProvider::new(Ok(hits()));
        let params = TrendingParams {
            lang: Some("xx-XX".to_string()),
        };

        let result = trending_handler(State(state(provider.clone())), Ok(Query(params))).await;
        assert!(matches!(result, Err(ApiError::InvalidLanguage(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_handler_filters_media_types() {
        let provider = CountingProvider::new(Ok(hits()));
        let params = SearchParams {
            q: Some(" ab ".to_string()),
            lang: None,
        };

        let Json(value) = search_handler(State(state(provider)), Ok(Query(params)))
            .await
            .unwrap();
        assert_eq!(value, json!([{"id": 1, "media_type": "movie", "poster_path": "/a.jpg"}]));
    }

    #[tokio::test]
    async fn test_search_handler_maps_upstream_error() {
        let provider = CountingProvider::new(Err(UpstreamError::Connection("refused".into())));
        let params = SearchParams {
            q: Some("dune".to_string()),
            lang: Some("de-DE".to_string()),
        };

        let err = search_handler(State(state(provider)), Ok(Query(params)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(matches!(err, ApiError::Upstream { endpoint: Endpoint::Search { .. }, .. }));
    }

    #[tokio::test]
    async fn test_health_handler_reports_cache() {
        let provider = CountingProvider::new(Ok(hits()));
        let state = state(provider).with_environment("test");
        trending_handler(State(state.clone()), Ok(Query(TrendingParams::default())))
            .await
            .unwrap();

        let Json(response) = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.cache.entries, 1);
        assert_eq!(response.cache.misses, 1);
        assert_eq!(response.app.environment, "test");
    }

    #[tokio::test]
    async fn test_search_handler_rejects_bad_query_string() {
        let provider = CountingProvider::new(Ok(hits()));
        let uri: Uri = "/api/search?q=ab&q=cd".parse().unwrap();
        let rejection = Query::<SearchParams>::try_from_uri(&uri).unwrap_err();

        let err = search_handler(State(state(provider.clone())), Err(rejection))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadQuery(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_method_not_allowed_handler() {
        let (status, Json(body)) =
            method_not_allowed_handler(Method::POST, "/api/trending".parse().unwrap()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.method, "POST");
        assert_eq!(body.path, "/api/trending");
    }

    #[tokio::test]
    async fn test_root_handler() {
        let Json(response) = root_handler().await;
        assert!(response.endpoints.contains_key("search"));
    }
}
