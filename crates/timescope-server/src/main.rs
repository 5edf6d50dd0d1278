//! Timescope HTTP Server
//!
//! Serves the time-perception questionnaire, scores submissions and rebuilds
//! shared results.

use anyhow::Result;
use std::sync::Arc;
use timescope_server::{api, config::ServerConfig, engine};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize assessment engine
    let engine = engine::init_engine(&config).await?;
    info!("Assessment engine initialized");

    let app = api::create_router(Arc::new(engine));

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Questionnaire: http://{}/v1/questionnaire", addr);
    info!("  Assessment API: POST http://{}/v1/assess", addr);
    info!("  Shared results: http://{}/v1/result?intensity=..", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins; otherwise the configured log level applies to the
/// Timescope crates.
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let level = &config.log_level;
    let json = config.log_json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "timescope_server={level},timescope_engine={level},timescope_repository={level},tower_http=debug"
                )
                .into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
