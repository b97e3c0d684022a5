//! Lease Bid API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use leasebid_api::config::ApiConfig;
use leasebid_api::error::AppError;
use leasebid_api::state::AppState;
use leasebid_core::clock::SystemClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting lease bid walkthrough API server");

    let config = ApiConfig::from_env()?;
    let app_state = AppState::new(
        Arc::new(SystemClock),
        config.walkthrough_settings(),
        config.max_sessions,
    );

    // TODO: Replace CorsLayer::permissive() with the renderer's origin once it has a fixed host.
    let app = leasebid_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!(
        auto_advance = config.auto_advance,
        max_sessions = config.max_sessions,
        "Listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
