//! In-memory record store
//!
//! Suitable for tests and development; records are lost when the process
//! exits.

use async_trait::async_trait;
use timescope_core::StoredRecord;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::RecordStore;

/// In-memory record store
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<StoredRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, record: &StoredRecord) -> StoreResult<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>> {
        Ok(self.records.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use timescope_core::ScoreProfile;

    fn record(score: i32) -> StoredRecord {
        StoredRecord::from_profile(&ScoreProfile::uniform(score), None, None, Utc::now())
    }

    #[tokio::test]
    async fn test_append_and_fetch_in_order() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty().await);

        store.append(&record(5)).await.unwrap();
        store.append(&record(25)).await.unwrap();

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].intensity, Some(5));
        assert_eq!(all[1].intensity, Some(25));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let store = Arc::new(MemoryRecordStore::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(&record(5 + i % 21)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len().await, 50);
    }
}
