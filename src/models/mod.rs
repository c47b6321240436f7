//! Request and Response models for the gateway API
//!
//! Query parameter DTOs, language tags, content item filters and the bodies
//! of the informational endpoints.

pub mod item;
pub mod language;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use language::Language;
pub use requests::{SearchParams, TrendingParams, ValidSearch, MIN_QUERY_LENGTH};
pub use responses::{
    CacheReport, HealthResponse, InfoResponse, MethodNotAllowedResponse, NotFoundResponse,
    ServiceStatus,
};
