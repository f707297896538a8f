mod config;
mod errors;
mod matcher_client;
mod models;
mod relay;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matcher_client::MatcherClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing webhook URL)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Relay v{}", env!("CARGO_PKG_VERSION"));

    let matcher = MatcherClient::new(
        config.matcher_webhook_url.clone(),
        config.matcher_timeout,
    )
    .context("Failed to build matching service HTTP client")?;
    info!(
        "Matching service client initialized (host: {}, timeout: {}s)",
        matcher.url().host_str().unwrap_or("unknown"),
        config.matcher_timeout.as_secs()
    );
    info!(
        "Upload limit {} bytes, accepted types: {:?}",
        config.max_upload_bytes, config.accepted_file_types
    );

    let state = AppState {
        matcher,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
