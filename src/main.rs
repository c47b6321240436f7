//! FlickFinder Gateway - A caching HTTP front for TMDB
//!
//! Re-exposes trending and multi-search results with a TTL response cache,
//! input validation and normalized error responses.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flick_gateway::api::create_router;
use flick_gateway::{AppState, Config};

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Load `.env` and configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the TMDB client and an empty response cache
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Defaults to "info" level ("debug" with APP_DEBUG), can be overridden with RUST_LOG
    let default_filter = if config.debug {
        "flick_gateway=debug,tower_http=debug"
    } else {
        "flick_gateway=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FlickFinder Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, upstream_timeout={}s, debug={}",
        config.server_port,
        config.cache_ttl.as_secs(),
        config.upstream_timeout.as_secs(),
        config.debug
    );
    if config.has_api_key() {
        info!("TMDB API key: set");
    } else {
        warn!("TMDB_API_KEY not found in environment variables");
    }

    let state = AppState::from_config(&config).context("failed to build TMDB client")?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
