//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /` - Welcome message and endpoint list
//! - `GET /api/trending?lang=` - Trending movies and TV shows
//! - `GET /api/search?q=&lang=` - Movie and TV search
//! - `GET /api/health` - Upstream reachability and cache usage

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
