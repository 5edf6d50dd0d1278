//! Store construction and instrument loading

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use timescope_core::Instrument;
use tracing::info;

use crate::config::{StoreConfig, StoreSource};
use crate::error::{StoreError, StoreResult};
use crate::file::CsvFileRecordStore;
use crate::memory::MemoryRecordStore;
use crate::traits::RecordStore;

/// Build the record store described by `config`
///
/// ```rust
/// use timescope_repository::{open_store, StoreConfig};
///
/// let store = open_store(&StoreConfig::memory()).unwrap();
/// assert_eq!(store.name(), "memory");
/// ```
pub fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    config.validate()?;

    let store: Arc<dyn RecordStore> = match config.source {
        StoreSource::Memory => Arc::new(MemoryRecordStore::new()),
        StoreSource::File => {
            let path = config.path.as_deref().unwrap_or_default();
            Arc::new(CsvFileRecordStore::new(path))
        }
        StoreSource::Api => open_api_store(config)?,
    };

    info!("Using {} record store", store.name());
    Ok(store)
}

#[cfg(feature = "api")]
fn open_api_store(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    let url = config.api_url.as_deref().unwrap_or_default();
    let store = crate::api::SheetApiRecordStore::new(url, config.api_key.clone())?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "api"))]
fn open_api_store(_config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    Err(StoreError::Unavailable(
        "sheet API support requires the 'api' feature".to_string(),
    ))
}

/// Load and validate an instrument definition from a YAML file
pub async fn load_instrument(path: impl AsRef<Path>) -> StoreResult<Instrument> {
    let path = path.as_ref();
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StoreError::InstrumentNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let instrument = Instrument::from_yaml_str(&content)?;
    info!(
        "Loaded instrument '{}' v{} from {}",
        instrument.title,
        instrument.version,
        path.display()
    );
    Ok(instrument)
}
