//! FlickFinder Gateway - A caching HTTP front for TMDB
//!
//! Re-exposes trending and multi-search results with a TTL response cache,
//! input validation and normalized error responses.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
