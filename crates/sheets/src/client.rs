//! Thin client over the Sheets v4 `values` endpoints.

use serde_json::{json, Value};
use tokio::sync::OnceCell;

use facepair_core::record::header_row;

use crate::auth::TokenProvider;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Client for one spreadsheet.
///
/// Appends are single round trips with no batching or retry; a failure is
/// reported to the caller, whose user resubmits.
pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    tokens: TokenProvider,
    /// Header bootstrap runs at most once per process, on first append.
    header_checked: OnceCell<()>,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: String) -> Self {
        let http = reqwest::Client::new();
        Self {
            tokens: TokenProvider::new(key, http.clone()),
            http,
            spreadsheet_id,
            header_checked: OnceCell::new(),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Append one row, writing the column header first if the sheet is
    /// still empty.
    pub async fn append_row(&self, row: Vec<Value>) -> Result<(), SheetsError> {
        self.header_checked
            .get_or_try_init(|| self.init_header())
            .await?;
        self.raw_append(row).await
    }

    /// Read all data rows (everything below the header).
    pub async fn data_rows(&self) -> Result<Vec<Vec<Value>>, SheetsError> {
        self.values_get("A2:K").await
    }

    async fn init_header(&self) -> Result<(), SheetsError> {
        let first_row = self.values_get("A1:K1").await?;
        if first_row.is_empty() {
            self.raw_append(header_row()).await?;
            tracing::info!(spreadsheet_id = %self.spreadsheet_id, "Wrote header row to empty sheet");
        }
        Ok(())
    }

    async fn raw_append(&self, row: Vec<Value>) -> Result<(), SheetsError> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{SHEETS_API_BASE}/{}/values/A1:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.spreadsheet_id
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn values_get(&self, range: &str) -> Result<Vec<Vec<Value>>, SheetsError> {
        let token = self.tokens.access_token().await?;
        let url = format!("{SHEETS_API_BASE}/{}/values/{range}", self.spreadsheet_id);

        let response = self.http.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        #[derive(serde::Deserialize)]
        struct ValueRange {
            #[serde(default)]
            values: Vec<Vec<Value>>,
        }

        let body: ValueRange = response.json().await.map_err(|e| SheetsError::Api {
            status: status.as_u16(),
            message: format!("malformed values response: {e}"),
        })?;
        Ok(body.values)
    }
}
