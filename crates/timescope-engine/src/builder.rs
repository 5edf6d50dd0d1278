//! Builder pattern for AssessmentEngine

use std::path::PathBuf;
use std::sync::Arc;
use timescope_core::Instrument;
use timescope_repository::{load_instrument, open_store, RecordStore, StoreConfig};
use tracing::info;

use crate::codec::RangePolicy;
use crate::config::EngineConfig;
use crate::engine::AssessmentEngine;
use crate::error::Result;

/// Builder for AssessmentEngine
///
/// # Example
///
/// ```rust,no_run
/// use timescope_engine::{AssessmentEngineBuilder, RangePolicy};
/// use timescope_repository::StoreConfig;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let engine = AssessmentEngineBuilder::new()
///     .with_store_config(StoreConfig::file("data/records.csv"))
///     .with_instrument_file("config/instrument.yaml")
///     .with_range_policy(RangePolicy::Strict)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Without any store the engine keeps records in memory; without any
/// instrument it uses the built-in one.
pub struct AssessmentEngineBuilder {
    config: EngineConfig,
    instrument: Option<Instrument>,
    instrument_path: Option<PathBuf>,
    store: Option<Arc<dyn RecordStore>>,
    store_config: Option<StoreConfig>,
}

impl AssessmentEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            instrument: None,
            instrument_path: None,
            store: None,
            store_config: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_min_sample_size(mut self, size: usize) -> Self {
        self.config.min_sample_size = size;
        self
    }

    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.config.range_policy = policy;
        self
    }

    /// Use an instrument already in memory. Takes precedence over
    /// [`with_instrument_file`](Self::with_instrument_file).
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Load the instrument from a YAML file at build time
    pub fn with_instrument_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.instrument_path = Some(path.into());
        self
    }

    /// Use an existing store. Takes precedence over
    /// [`with_store_config`](Self::with_store_config).
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = Some(config);
        self
    }

    /// Build the engine
    ///
    /// Fails on invalid configuration, an unreadable or invalid instrument
    /// file, or an incomplete store configuration.
    pub async fn build(self) -> Result<AssessmentEngine> {
        self.config.validate()?;

        let instrument = match (self.instrument, self.instrument_path) {
            (Some(instrument), _) => {
                instrument.validate()?;
                instrument
            }
            (None, Some(path)) => load_instrument(&path).await?,
            (None, None) => Instrument::builtin()?,
        };

        let store = match (self.store, self.store_config) {
            (Some(store), _) => store,
            (None, Some(config)) => open_store(&config)?,
            (None, None) => open_store(&StoreConfig::memory())?,
        };

        info!(
            "Assessment engine ready: instrument '{}' v{}, {} store, min sample size {}, {:?} tokens",
            instrument.title,
            instrument.version,
            store.name(),
            self.config.min_sample_size,
            self.config.range_policy
        );

        Ok(AssessmentEngine::new(instrument, self.config, store))
    }
}

impl Default for AssessmentEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
