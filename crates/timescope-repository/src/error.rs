//! Error types for the record store layer

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;
use timescope_core::CoreError;

/// Result type alias for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing score records
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// API error (HTTP requests, authentication, unexpected status)
    #[error("API error: {0}")]
    ApiError(String),

    /// Backend cannot be reached or was not compiled in
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be turned into a record
    #[error("Invalid row {line}: {message}")]
    InvalidRow { line: usize, message: String },

    /// Store configuration is incomplete
    #[error("Invalid store configuration: {0}")]
    Config(#[from] ConfigError),

    /// Instrument file not found
    #[error("Instrument not found: {}", path.display())]
    InstrumentNotFound { path: PathBuf },

    /// Instrument file failed to parse or validate
    #[error("Invalid instrument: {0}")]
    Instrument(#[from] CoreError),
}

impl StoreError {
    /// Whether the failure came from the backend rather than from bad data
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::ApiError(_) | StoreError::Unavailable(_)
        )
    }
}
