//! Persisted row layout
//!
//! Every backend stores the same seven columns:
//!
//! ```text
//! timestamp,nickname,role,intensity,quantity,accuracy,positivity
//! ```
//!
//! Timestamps are written as RFC 3339. Reading is lenient so that rows edited
//! by hand or written by other tools still load: empty or non-numeric score
//! cells and unknown roles are read as absent, and rows whose timestamp cannot
//! be read at all are skipped.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use timescope_core::{Role, StoredRecord};
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Column names, in order
pub const HEADER: [&str; 7] = [
    "timestamp",
    "nickname",
    "role",
    "intensity",
    "quantity",
    "accuracy",
    "positivity",
];

/// Legacy timestamp layout accepted on read
const NAIVE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Encode a record as row cells
pub fn to_row(record: &StoredRecord) -> Vec<String> {
    let score = |value: Option<i32>| value.map(|v| v.to_string()).unwrap_or_default();

    vec![
        record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        record.nickname.clone().unwrap_or_default(),
        record.role.map(|r| r.key().to_string()).unwrap_or_default(),
        score(record.intensity),
        score(record.quantity),
        score(record.accuracy),
        score(record.positivity),
    ]
}

/// The header cells as owned strings
pub fn header_row() -> Vec<String> {
    HEADER.iter().map(|h| h.to_string()).collect()
}

/// Whether a row is the header row
pub fn is_header<S: AsRef<str>>(cells: &[S]) -> bool {
    cells
        .first()
        .map(|cell| cell.as_ref().trim().eq_ignore_ascii_case(HEADER[0]))
        .unwrap_or(false)
}

/// Decode one row. `line` is 1-based and only used in the error.
pub fn from_row<S: AsRef<str>>(cells: &[S], line: usize) -> StoreResult<StoredRecord> {
    let cell = |index: usize| cell_at(cells, index);

    let timestamp = parse_timestamp(cell(0)).ok_or_else(|| StoreError::InvalidRow {
        line,
        message: format!("unreadable timestamp '{}'", cell(0)),
    })?;

    let nickname = Some(cell(1).to_string()).filter(|n| !n.is_empty());
    let role = cell(2).parse::<Role>().ok();

    Ok(StoredRecord {
        timestamp,
        nickname,
        role,
        intensity: parse_score(cell(3)),
        quantity: parse_score(cell(4)),
        accuracy: parse_score(cell(5)),
        positivity: parse_score(cell(6)),
    })
}

/// Decode a sequence of rows, dropping the header, blank rows and rows that
/// cannot be read
pub fn parse_rows<I, R, S>(rows: I) -> Vec<StoredRecord>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        let cells = row.as_ref();
        if is_header(cells) || cells.iter().all(|c| c.as_ref().trim().is_empty()) {
            continue;
        }
        match from_row(cells, index + 1) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping stored row: {}", e),
        }
    }
    records
}

fn cell_at<S: AsRef<str>>(cells: &[S], index: usize) -> &str {
    cells.get(index).map(|c| c.as_ref().trim()).unwrap_or("")
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, NAIVE_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_score(value: &str) -> Option<i32> {
    if let Ok(score) = value.parse::<i32>() {
        return Some(score);
    }
    // Spreadsheets tend to hand integers back as "12.0"
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use timescope_core::ScoreProfile;

    fn sample() -> StoredRecord {
        StoredRecord::from_profile(
            &ScoreProfile::new(10, 14, 9, 21),
            Some("kai".to_string()),
            Some(Role::Researcher),
            Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_row_layout() {
        assert_eq!(
            to_row(&sample()),
            vec![
                "2024-03-02T08:00:00Z",
                "kai",
                "researcher",
                "10",
                "14",
                "9",
                "21"
            ]
        );
    }

    #[test]
    fn test_row_reads_back() {
        let row = to_row(&sample());
        assert_eq!(from_row(&row, 1).unwrap(), sample());
    }

    #[test]
    fn test_lenient_cells() {
        let record = from_row(
            &["2024-03-02 08:00:00", "", "astronaut", "12.0", "n/a", "", "7"],
            2,
        )
        .unwrap();

        assert!(record.nickname.is_none());
        assert!(record.role.is_none());
        assert_eq!(record.intensity, Some(12));
        assert_eq!(record.quantity, None);
        assert_eq!(record.accuracy, None);
        assert_eq!(record.positivity, Some(7));
        assert!(record.profile().is_none());
    }

    #[test]
    fn test_short_row_reads_missing_scores_as_absent() {
        let record = from_row(&["2024-03-02T08:00:00Z", "a"], 1).unwrap();
        assert_eq!(record.nickname.as_deref(), Some("a"));
        assert!(record.intensity.is_none());
        assert!(record.positivity.is_none());
    }

    #[test]
    fn test_unreadable_timestamp_is_an_error() {
        let err = from_row(&["yesterday", "", "", "1", "1", "1", "1"], 4).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { line: 4, .. }));
    }

    #[test]
    fn test_parse_rows_skips_header_blank_and_bad_rows() {
        let rows = vec![
            header_row(),
            to_row(&sample()),
            vec![String::new(); 7],
            vec!["garbage".to_string()],
            to_row(&sample()),
        ];

        let records = parse_rows(rows);
        assert_eq!(records.len(), 2);
    }
}
