//! Assessment engine initialization
//!
//! Converts the server configuration into an [`AssessmentEngineBuilder`] and
//! builds the engine shared by every request.

use crate::config::ServerConfig;
use anyhow::Result;
use timescope_engine::{AssessmentEngine, AssessmentEngineBuilder};
use tracing::info;

/// Initialize the assessment engine
pub async fn init_engine(config: &ServerConfig) -> Result<AssessmentEngine> {
    let mut builder = AssessmentEngineBuilder::new()
        .with_store_config(config.store.to_store_config())
        .with_min_sample_size(config.min_sample_size)
        .with_range_policy(config.token_range_policy);

    if let Some(path) = &config.instrument_path {
        info!("Loading instrument from {}", path.display());
        builder = builder.with_instrument_file(path.clone());
    }

    builder
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build assessment engine: {}", e))
}
