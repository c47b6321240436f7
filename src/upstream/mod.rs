//! Upstream Module
//!
//! The metadata provider seam, its TMDB implementation and the executor
//! that turns provider bodies into filtered result lists.

mod executor;
mod tmdb;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::{Language, ServiceStatus};

pub use executor::{
    extract_results, fetch_search, fetch_trending, SEARCH_LIMIT, SEARCH_OPERATION,
    TRENDING_LIMIT, TRENDING_OPERATION,
};
pub use tmdb::{TmdbClient, DEFAULT_BASE_URL};

/// A source of trending and search data.
///
/// Implementations return the provider's decoded JSON body untouched;
/// shape checks and filtering happen in the executor.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Trending movies and TV shows of the day.
    async fn trending(&self, language: Language) -> Result<Value, UpstreamError>;

    /// Multi-type search across movies, TV shows and people.
    async fn search_multi(&self, query: &str, language: Language)
        -> Result<Value, UpstreamError>;

    /// Reachability check used by the health endpoint. Never fails.
    async fn probe(&self) -> ServiceStatus;
}
