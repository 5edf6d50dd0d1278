//! Record store layer for Timescope
//!
//! Score records of consenting respondents are appended to a shared store and
//! read back as the population for percentile ranking. This crate defines the
//! [`RecordStore`] trait, the persisted row layout, and three backends:
//!
//! - **Memory**: process-local, for tests and development
//! - **File**: a CSV file on local disk
//! - **Api**: a remote sheet behind an HTTP API (feature `api`)
//!
//! # Quick Start
//!
//! ```no_run
//! use timescope_repository::{open_store, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = open_store(&StoreConfig::file("data/records.csv"))?;
//!     let population = store.fetch_all().await?;
//!     println!("{} stored records", population.len());
//!     Ok(())
//! }
//! ```
//!
//! The instrument (questions, cut point, recommendation table) can also be
//! loaded from disk with [`load_instrument`].

pub mod config;
pub mod error;
pub mod file;
pub mod loader;
pub mod memory;
pub mod row;
pub mod traits;

#[cfg(feature = "api")]
pub mod api;

pub use config::{ConfigError, StoreConfig, StoreSource};
pub use error::{StoreError, StoreResult};
pub use file::CsvFileRecordStore;
pub use loader::{load_instrument, open_store};
pub use memory::MemoryRecordStore;
pub use traits::RecordStore;

#[cfg(feature = "api")]
pub use api::SheetApiRecordStore;
