//! Engine error types

use thiserror::Error;
use timescope_core::CoreError;
use timescope_repository::StoreError;

/// Engine error type
///
/// Store failures during an assessment are contained by the engine and never
/// surface here; [`EngineError::Store`] only appears while building.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed answers, token or instrument
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Record store could not be opened or the instrument file loaded
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::Core(e) if e.is_invalid_input())
    }

    pub fn is_invalid_token(&self) -> bool {
        matches!(self, EngineError::Core(e) if e.is_invalid_token())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
