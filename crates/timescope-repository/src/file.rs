//! CSV file record store

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use timescope_core::StoredRecord;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::row;
use crate::traits::RecordStore;

/// Record store backed by a local CSV file
///
/// The file and its parent directory are created on first append. Appends
/// within one process are serialized so rows never interleave and the header
/// is written exactly once.
#[derive(Debug)]
pub struct CsvFileRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvFileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn is_empty_on_disk(&self) -> StoreResult<bool> {
        match fs::metadata(&self.path).await {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    fn encode(rows: &[Vec<String>]) -> StoreResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

#[async_trait]
impl RecordStore for CsvFileRecordStore {
    async fn append(&self, record: &StoredRecord) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut rows = Vec::with_capacity(2);
        if self.is_empty_on_disk().await? {
            rows.push(row::header_row());
        }
        rows.push(row::to_row(record));
        let bytes = Self::encode(&rows)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!("Appended record to {}", self.path.display());
        Ok(())
    }

    async fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());

        // Hand-edited files may carry Latin-1 cells; decode lossily per cell
        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            match result {
                Ok(record) => rows.push(
                    record
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect::<Vec<_>>(),
                ),
                Err(e) => warn!(
                    "Skipping unreadable record {} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ),
            }
        }

        Ok(row::parse_rows(rows))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::{NamedTempFile, TempDir};
    use timescope_core::{Role, ScoreProfile};

    fn record(score: i32, nickname: Option<&str>) -> StoredRecord {
        StoredRecord::from_profile(
            &ScoreProfile::uniform(score),
            nickname.map(str::to_string),
            Some(Role::Engineer),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_population() {
        let dir = TempDir::new().unwrap();
        let store = CsvFileRecordStore::new(dir.path().join("none.csv"));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("records.csv");
        let store = CsvFileRecordStore::new(&path);

        store.append(&record(10, Some("ann"))).await.unwrap();
        store.append(&record(20, None)).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "timestamp,nickname,role,intensity,quantity,accuracy,positivity"
        );
        assert_eq!(content.matches("timestamp").count(), 1);

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nickname.as_deref(), Some("ann"));
        assert_eq!(all[1].nickname, None);
        assert_eq!(all[1].positivity, Some(20));
    }

    #[tokio::test]
    async fn test_nickname_with_comma_is_quoted() {
        let dir = TempDir::new().unwrap();
        let store = CsvFileRecordStore::new(dir.path().join("records.csv"));

        store.append(&record(12, Some("doe, jane"))).await.unwrap();

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all[0].nickname.as_deref(), Some("doe, jane"));
        assert_eq!(all[0].intensity, Some(12));
    }

    #[tokio::test]
    async fn test_reads_rows_from_other_tools() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,nickname,role,intensity,quantity,accuracy,positivity").unwrap();
        writeln!(file, "2024-01-01 10:00:00,,student,10,11,12,13").unwrap();
        writeln!(file, "2024-01-02T10:00:00Z,bob,,abc,11,12,13").unwrap();
        writeln!(file, "not a date,bob,,1,1,1,1").unwrap();
        file.flush().unwrap();

        let store = CsvFileRecordStore::new(file.path());
        let all = store.fetch_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].role, Some(Role::Student));
        assert_eq!(all[1].intensity, None);
        assert_eq!(all[1].quantity, Some(11));
    }

    #[tokio::test]
    async fn test_non_utf8_row_does_not_hide_population() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,nickname,role,intensity,quantity,accuracy,positivity").unwrap();
        for score in [8, 10, 12] {
            writeln!(file, "2024-03-01T08:00:00Z,,,{},{},{},{}", score, score, score, score).unwrap();
        }
        file.write_all(b"2024-03-04T08:00:00Z,Jos\xe9,other,14,14,14,14\n").unwrap();
        for score in [16, 18, 20] {
            writeln!(file, "2024-03-05T08:00:00Z,,,{},{},{},{}", score, score, score, score).unwrap();
        }
        file.flush().unwrap();

        let store = CsvFileRecordStore::new(file.path());
        let all = store.fetch_all().await.unwrap();

        assert_eq!(all.len(), 7);
        assert_eq!(all[3].intensity, Some(14));
        assert_eq!(all[3].role, Some(Role::Other));
        assert!(all[3].nickname.as_deref().unwrap().starts_with("Jos"));
        assert_eq!(all[6].positivity, Some(20));
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_every_row() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CsvFileRecordStore::new(dir.path().join("records.csv")));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(&record(5 + i, None)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 21);
        assert_eq!(store.fetch_all().await.unwrap().len(), 20);
    }
}
