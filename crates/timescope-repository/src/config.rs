//! Record store configuration types

use serde::{Deserialize, Serialize};

/// Record store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSource {
    /// Process-local, lost on restart
    Memory,
    /// CSV file on local disk
    File,
    /// Remote spreadsheet behind an HTTP API
    Api,
}

impl Default for StoreSource {
    fn default() -> Self {
        Self::Memory
    }
}

/// Record store configuration
///
/// # Examples
///
/// ```rust
/// use timescope_repository::StoreConfig;
///
/// // CSV file
/// let config = StoreConfig::file("data/records.csv");
///
/// // Sheet API
/// let config = StoreConfig::api("https://sheets.example.com/timescope")
///     .with_api_key("secret-key");
///
/// // In memory (for testing)
/// let config = StoreConfig::memory();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub source: StoreSource,

    /// CSV file path (required for File source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// API base URL (required for Api source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Bearer token (optional for Api source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            source: StoreSource::File,
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn api(url: impl Into<String>) -> Self {
        Self {
            source: StoreSource::Api,
            api_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Set API key for authentication
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if a field required by the selected source is missing
    /// or blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let require = |value: &Option<String>, source: &str, field: &str| {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(()),
                _ => Err(ConfigError::MissingField {
                    source: source.to_string(),
                    field: field.to_string(),
                }),
            }
        };

        match self.source {
            StoreSource::Memory => Ok(()),
            StoreSource::File => require(&self.path, "File", "path"),
            StoreSource::Api => require(&self.api_url, "Api", "api_url"),
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    MissingField { source: String, field: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { source, field } => {
                write!(f, "{} source requires {} to be set", source, field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
