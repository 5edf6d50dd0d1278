//! Server configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use timescope_engine::{RangePolicy, StoreConfig, DEFAULT_MIN_SAMPLE_SIZE};

/// Record store backing the population ranking
///
/// `Debug` never prints the API key.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreType {
    /// Process-local store, lost on restart
    Memory,
    /// CSV file on local disk
    File {
        /// Record file (default: "data/records.csv")
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    /// Spreadsheet behind an HTTP API
    Api {
        /// Base URL for the API
        base_url: String,
        /// Optional API key for authentication
        #[serde(default)]
        api_key: Option<String>,
    },
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/records.csv")
}

impl fmt::Debug for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreType::Memory => f.write_str("Memory"),
            StoreType::File { path } => f.debug_struct("File").field("path", path).finish(),
            StoreType::Api { base_url, api_key } => f
                .debug_struct("Api")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

impl Default for StoreType {
    fn default() -> Self {
        StoreType::File {
            path: default_store_path(),
        }
    }
}

impl StoreType {
    /// Repository-level configuration for this store
    pub fn to_store_config(&self) -> StoreConfig {
        match self {
            StoreType::Memory => StoreConfig::memory(),
            StoreType::File { path } => StoreConfig::file(path.to_string_lossy().to_string()),
            StoreType::Api { base_url, api_key } => {
                let config = StoreConfig::api(base_url.clone());
                if let Some(key) = api_key {
                    config.with_api_key(key.clone())
                } else {
                    config
                }
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Record store configuration
    pub store: StoreType,

    /// Instrument YAML to use instead of the built-in one
    pub instrument_path: Option<PathBuf>,

    /// Stored records required before percentiles are reported
    pub min_sample_size: usize,

    /// How shared result links with out-of-range scores are treated
    pub token_range_policy: RangePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            store: StoreType::default(),
            instrument_path: None,
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            token_range_policy: RangePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config/server.*` and `TIMESCOPE_*` variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::load_from("config/server")
    }

    /// Load configuration from the given file stem and the environment
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load_from(file_stem: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_stem = file_stem.as_ref().to_string_lossy();

        config::Config::builder()
            .add_source(config::File::with_name(&file_stem).required(false))
            .add_source(config::Environment::with_prefix("TIMESCOPE"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config '{}': {}", file_stem, e))?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timescope_repository::StoreSource;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.min_sample_size, 5);
        assert_eq!(config.token_range_policy, RangePolicy::PassThrough);
        assert!(config.instrument_path.is_none());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_store_type_default_is_csv_file() {
        if let StoreType::File { path } = StoreType::default() {
            assert_eq!(path, PathBuf::from("data/records.csv"));
        } else {
            panic!("Expected File store type");
        }
    }

    #[test]
    fn test_store_type_to_store_config() {
        let memory = StoreType::Memory.to_store_config();
        assert_eq!(memory.source, StoreSource::Memory);

        let file = StoreType::File {
            path: PathBuf::from("/tmp/records.csv"),
        }
        .to_store_config();
        assert_eq!(file.source, StoreSource::File);
        assert_eq!(file.path.as_deref(), Some("/tmp/records.csv"));

        let api = StoreType::Api {
            base_url: "https://sheets.example.com".to_string(),
            api_key: Some("secret-key".to_string()),
        }
        .to_store_config();
        assert_eq!(api.source, StoreSource::Api);
        assert_eq!(api.api_url.as_deref(), Some("https://sheets.example.com"));
        assert_eq!(api.api_key.as_deref(), Some("secret-key"));
    }

    #[test]
    fn test_deserialize_partial_config_fills_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "port": 9000,
            "store": { "type": "memory" },
            "token_range_policy": "strict"
        }))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.store, StoreType::Memory);
        assert_eq!(config.min_sample_size, 5);
        assert_eq!(config.token_range_policy, RangePolicy::Strict);
    }

    #[test]
    fn test_deserialize_file_store_without_path() {
        let store: StoreType = serde_json::from_value(serde_json::json!({ "type": "file" })).unwrap();
        assert_eq!(store, StoreType::default());
    }

    #[test]
    fn test_store_type_debug_redacts_api_key() {
        let store = StoreType::Api {
            base_url: "https://sheets.example.com".to_string(),
            api_key: Some("secret-key".to_string()),
        };
        let config = ServerConfig {
            store,
            ..ServerConfig::default()
        };

        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret-key"));
        assert!(debug_str.contains("<redacted>"));
        assert!(debug_str.contains("https://sheets.example.com"));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServerConfig::load_from(dir.path().join("server")).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreType::default());
    }

    #[test]
    fn test_load_from_reads_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("server.yaml"),
            "port: 9100\nstore:\n  type: memory\nmin_sample_size: 3\n",
        )
        .unwrap();

        let config = ServerConfig::load_from(dir.path().join("server")).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.store, StoreType::Memory);
        assert_eq!(config.min_sample_size, 3);
    }

    #[test]
    fn test_load_from_malformed_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("server.yaml"), "port: [unclosed\n").unwrap();

        let err = ServerConfig::load_from(dir.path().join("server")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_deserialize_api_store_requires_base_url() {
        let result: Result<StoreType, _> =
            serde_json::from_value(serde_json::json!({ "type": "api" }));
        assert!(result.is_err());
    }
}
