//! Google Sheets read client.
//!
//! The import pipeline only needs two reads: spreadsheet metadata (to learn
//! which sheets exist) and a rectangular cell range. Both sit behind the
//! `SheetsApi` trait so the orchestrator can run against an in-memory fake.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;

const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Spreadsheet metadata: the titles of its sheets, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetMeta {
    pub sheet_titles: Vec<String>,
}

/// Read access to a spreadsheet, authorized per call by the user's OAuth
/// access token. Carried in `AppState` as `Arc<dyn SheetsApi>`.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    async fn spreadsheet_meta(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
    ) -> Result<SpreadsheetMeta, AppError>;

    /// Fetches a cell range in A1 notation. Returns the rows Google reports;
    /// an entirely empty range comes back as zero rows.
    async fn value_range(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, AppError>;
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    values: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Live client against the Sheets v4 REST API.
pub struct GoogleSheetsApi {
    client: Client,
}

impl GoogleSheetsApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Sheets(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            // Google wraps failures in {"error": {"message": ...}}.
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("status {status}"));
            return Err(AppError::Sheets(message));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::Sheets(format!("unexpected response shape: {e}")))
    }
}

#[async_trait]
impl SheetsApi for GoogleSheetsApi {
    async fn spreadsheet_meta(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
    ) -> Result<SpreadsheetMeta, AppError> {
        let url = format!("{SHEETS_ENDPOINT}/{spreadsheet_id}");
        let parsed: SpreadsheetResponse = self.get_json(&url, access_token).await?;
        Ok(SpreadsheetMeta {
            sheet_titles: parsed
                .sheets
                .into_iter()
                .map(|s| s.properties.title)
                .collect(),
        })
    }

    async fn value_range(
        &self,
        access_token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, AppError> {
        let url = format!(
            "{SHEETS_ENDPOINT}/{spreadsheet_id}/values/{}",
            encode_path_segment(range)
        );
        let parsed: ValueRangeResponse = self.get_json(&url, access_token).await?;
        Ok(parsed.values.unwrap_or_default())
    }
}

/// Percent-encodes one URL path segment. A1 ranges carry quotes, spaces, and
/// `!`, none of which may appear raw in a request path.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
