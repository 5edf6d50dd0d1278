//! Core trait definition for score record persistence
//!
//! A [`RecordStore`] is append-only: rows are never updated or deleted, and
//! [`RecordStore::fetch_all`] returns every row written so far in write order.
//!
//! ```no_run
//! use chrono::Utc;
//! use timescope_core::{ScoreProfile, StoredRecord};
//! use timescope_repository::{MemoryRecordStore, RecordStore};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = MemoryRecordStore::new();
//! let record = StoredRecord::from_profile(&ScoreProfile::uniform(15), None, None, Utc::now());
//! store.append(&record).await?;
//! assert_eq!(store.fetch_all().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use timescope_core::StoredRecord;

use crate::StoreResult;

/// Append-only persistence for consenting respondents' score records
///
/// Implementations must be safe to share across request tasks. Concurrent
/// appends must each land as one complete row.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one record. The header row is written first when the store is
    /// empty.
    async fn append(&self, record: &StoredRecord) -> StoreResult<()>;

    /// All stored records, header excluded
    async fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}
