//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, root_handler, search_handler,
    trending_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Unknown paths answer 404 and unsupported methods 405, both with JSON
/// bodies.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/trending", get(trending_handler))
        .route("/api/search", get(search_handler))
        .route("/api/health", get(health_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
