//! HTTP sheet record store
//!
//! Persists rows to a remote spreadsheet exposed through a small HTTP API,
//! with optional Bearer token authentication.
//!
//! # Wire format
//!
//! ## GET {base_url}/rows
//!
//! Returns every row of the sheet, header included when present:
//!
//! ```json
//! { "rows": [["timestamp", "nickname", "..."], ["2024-05-01T09:30:00Z", "", "..."]] }
//! ```
//!
//! Cells may be strings, numbers or null.
//!
//! ## POST {base_url}/rows
//!
//! Appends rows in order. Same body shape as above.
//!
//! # Authentication
//!
//! ```text
//! Authorization: Bearer {api_key}
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use timescope_core::StoredRecord;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::row;
use crate::traits::RecordStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Record store backed by a remote sheet
pub struct SheetApiRecordStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RowsResponse {
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct AppendRequest {
    rows: Vec<Vec<String>>,
}

impl SheetApiRecordStore {
    /// Create a new sheet store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<impl Into<String>>,
    ) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.into()),
        })
    }

    fn rows_url(&self) -> String {
        format!("{}/rows", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn fetch_rows(&self) -> StoreResult<Vec<Vec<String>>> {
        let response = self
            .authorize(self.client.get(self.rows_url()))
            .send()
            .await
            .map_err(|e| StoreError::ApiError(format!("Failed to fetch rows: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Fetching rows returned HTTP {}",
                response.status()
            )));
        }

        let body: RowsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::ApiError(format!("Failed to parse rows: {}", e)))?;

        Ok(body
            .rows
            .into_iter()
            .map(|cells| cells.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for SheetApiRecordStore {
    async fn append(&self, record: &StoredRecord) -> StoreResult<()> {
        let existing = self.fetch_rows().await?;

        let mut rows = Vec::with_capacity(2);
        if existing.is_empty() {
            rows.push(row::header_row());
        }
        rows.push(row::to_row(record));

        let response = self
            .authorize(self.client.post(self.rows_url()))
            .json(&AppendRequest { rows })
            .send()
            .await
            .map_err(|e| StoreError::ApiError(format!("Failed to append row: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Appending row returned HTTP {}",
                response.status()
            )));
        }

        debug!("Appended record to sheet at {}", self.base_url);
        Ok(())
    }

    async fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>> {
        Ok(row::parse_rows(self.fetch_rows().await?))
    }

    fn name(&self) -> &'static str {
        "api"
    }
}
