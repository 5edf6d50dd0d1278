//! Backend-independent RecordStore behaviour

use chrono::Utc;
use std::sync::Arc;
use tempfile::TempDir;
use timescope_core::{ScoreProfile, StoredRecord};
use timescope_repository::{open_store, RecordStore, StoreConfig};

fn record(score: i32) -> StoredRecord {
    StoredRecord::from_profile(&ScoreProfile::uniform(score), None, None, Utc::now())
}

async fn exercise(store: Arc<dyn RecordStore>) {
    assert!(store.fetch_all().await.unwrap().is_empty());

    for score in [5, 12, 13, 25] {
        store.append(&record(score)).await.unwrap();
    }

    let scores: Vec<Option<i32>> = store
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(|r| r.accuracy)
        .collect();
    assert_eq!(scores, vec![Some(5), Some(12), Some(13), Some(25)]);
}

#[tokio::test]
async fn test_memory_store_contract() {
    exercise(open_store(&StoreConfig::memory()).unwrap()).await;
}

#[tokio::test]
async fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    exercise(open_store(&StoreConfig::file(path.to_string_lossy())).unwrap()).await;
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::file(dir.path().join("records.csv").to_string_lossy());

    open_store(&config)
        .unwrap()
        .append(&record(17))
        .await
        .unwrap();

    let reopened = open_store(&config).unwrap();
    let all = reopened.fetch_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].profile(), Some(ScoreProfile::uniform(17)));
}
