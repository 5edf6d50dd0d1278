//! Configuration types for AssessmentEngine

use serde::{Deserialize, Serialize};

use crate::codec::RangePolicy;
use crate::error::{EngineError, Result};
use crate::percentile::DEFAULT_MIN_SAMPLE_SIZE;

/// Main engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fewest valid stored scores needed before a percentile is reported
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,

    /// Range handling for decoded result tokens
    #[serde(default)]
    pub range_policy: RangePolicy,
}

fn default_min_sample_size() -> usize {
    DEFAULT_MIN_SAMPLE_SIZE
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            range_policy: RangePolicy::default(),
        }
    }

    pub fn with_min_sample_size(mut self, size: usize) -> Self {
        self.min_sample_size = size;
        self
    }

    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_sample_size == 0 {
            return Err(EngineError::Config(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
