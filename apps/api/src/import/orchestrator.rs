//! End-to-end import pipeline: resolve the sheet, fetch its rows, transform
//! them, and (for committed imports) bulk-insert the valid records.
//!
//! The network calls are strictly sequential — metadata decides which range
//! to fetch — and nothing is retried: the first failure aborts the run and
//! surfaces to the caller. Inserts happen once, at the end, so an abort
//! never leaves partial state behind.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::import::headers::resolve_headers;
use crate::import::transform::{transform_row, RowOutcome};
use crate::models::interview::NewInterview;
use crate::sheets::SheetsApi;
use crate::store::InterviewStore;

/// Imports read at most the first 1000 rows of columns A–F.
const IMPORT_RANGE: &str = "A1:F1000";

/// How many imported records are echoed back for display.
const PREVIEW_LEN: usize = 5;

/// Validated inputs for one import or preview run.
#[derive(Debug, Clone)]
pub struct ImportParams {
    pub spreadsheet_id: String,
    pub sheet_name: Option<String>,
    pub access_token: String,
    pub user_id: Uuid,
}

/// Aggregate result of an import run, built once and immutable after.
/// Row numbers in `skipped_rows` and in the `errors` messages are 1-based
/// sheet rows, counting the header row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub skipped_rows: Vec<usize>,
    pub errors: Vec<String>,
    pub preview_data: Vec<NewInterview>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub summary: ImportSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub total: usize,
    pub records: Vec<NewInterview>,
    pub skipped_rows: Vec<usize>,
    pub errors: Vec<String>,
}

/// Everything the transform stage produced from one sheet fetch.
struct TransformedSheet {
    total: usize,
    records: Vec<NewInterview>,
    skipped_rows: Vec<usize>,
    errors: Vec<String>,
}

/// Fetches the sheet and transforms its data rows. This is the one shared
/// pipeline behind preview and committed import; the two must never diverge.
async fn fetch_and_transform(
    sheets: &dyn SheetsApi,
    params: &ImportParams,
) -> Result<TransformedSheet, AppError> {
    let meta = sheets
        .spreadsheet_meta(&params.access_token, &params.spreadsheet_id)
        .await?;

    // No explicit sheet name: fall back to the first sheet.
    let effective_sheet = params
        .sheet_name
        .clone()
        .or_else(|| meta.sheet_titles.first().cloned());

    if let Some(name) = &effective_sheet {
        if !meta.sheet_titles.iter().any(|title| title == name) {
            return Err(AppError::NotFound(format!(
                "Sheet \"{name}\" not found in the spreadsheet. Available sheets: {}",
                meta.sheet_titles.join(", ")
            )));
        }
    }

    let range = match &effective_sheet {
        Some(name) => format!("'{name}'!{IMPORT_RANGE}"),
        None => IMPORT_RANGE.to_string(),
    };
    let rows = sheets
        .value_range(&params.access_token, &params.spreadsheet_id, &range)
        .await?;

    if rows.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No data found in the spreadsheet".to_string(),
        ));
    }

    let headers: Vec<String> = rows[0]
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let columns = resolve_headers(&headers);
    if !columns.has_required() {
        return Err(AppError::UnprocessableEntity(format!(
            "Missing required columns. Need at least 'Company' and 'Date' columns. \
             Found columns: {}",
            headers.join(", ")
        )));
    }

    let data_rows = &rows[1..];
    info!(
        "Processing {} data rows from sheet {:?}",
        data_rows.len(),
        effective_sheet
    );

    let mut records = Vec::new();
    let mut skipped_rows = Vec::new();
    let mut errors = Vec::new();

    for (i, row) in data_rows.iter().enumerate() {
        // 1-based sheet row, counting the header.
        let row_number = i + 2;
        match transform_row(row, &columns, params.user_id) {
            RowOutcome::Imported(record) => records.push(*record),
            RowOutcome::SkippedMissingRequired => skipped_rows.push(row_number),
            RowOutcome::Failed(reason) => {
                errors.push(format!("Row {row_number}: {reason}"));
                skipped_rows.push(row_number);
            }
        }
    }

    Ok(TransformedSheet {
        total: data_rows.len(),
        records,
        skipped_rows,
        errors,
    })
}

/// Runs a committed import: transform every data row, insert the valid
/// records in one statement, and report what happened.
pub async fn run_import(
    sheets: &dyn SheetsApi,
    store: &dyn InterviewStore,
    params: &ImportParams,
) -> Result<ImportResponse, AppError> {
    let sheet = fetch_and_transform(sheets, params).await?;

    let imported = if sheet.records.is_empty() {
        0
    } else {
        info!("Inserting {} interview records", sheet.records.len());
        store.insert_interviews(&sheet.records).await? as usize
    };

    let preview_data: Vec<NewInterview> =
        sheet.records.iter().take(PREVIEW_LEN).cloned().collect();

    Ok(ImportResponse {
        success: true,
        summary: ImportSummary {
            total: sheet.total,
            imported,
            skipped: sheet.skipped_rows.len(),
            skipped_rows: sheet.skipped_rows,
            errors: sheet.errors,
            preview_data,
        },
    })
}

/// Runs the read-only preview: identical fetch and transform, no insert.
pub async fn run_preview(
    sheets: &dyn SheetsApi,
    params: &ImportParams,
) -> Result<PreviewResponse, AppError> {
    let sheet = fetch_and_transform(sheets, params).await?;
    Ok(PreviewResponse {
        total: sheet.total,
        records: sheet.records,
        skipped_rows: sheet.skipped_rows,
        errors: sheet.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::SpreadsheetMeta;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeSheets {
        titles: Vec<String>,
        rows: Vec<Vec<String>>,
    }

    impl FakeSheets {
        fn new(titles: &[&str], rows: &[&[&str]]) -> Self {
            Self {
                titles: titles.iter().map(|t| t.to_string()).collect(),
                rows: rows
                    .iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl SheetsApi for FakeSheets {
        async fn spreadsheet_meta(
            &self,
            _access_token: &str,
            _spreadsheet_id: &str,
        ) -> Result<SpreadsheetMeta, AppError> {
            Ok(SpreadsheetMeta {
                sheet_titles: self.titles.clone(),
            })
        }

        async fn value_range(
            &self,
            _access_token: &str,
            _spreadsheet_id: &str,
            range: &str,
        ) -> Result<Vec<Vec<String>>, AppError> {
            assert!(range.ends_with("A1:F1000"), "unexpected range {range}");
            Ok(self.rows.clone())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        inserted: Mutex<Vec<NewInterview>>,
        fail: bool,
    }

    #[async_trait]
    impl InterviewStore for FakeStore {
        async fn insert_interviews(&self, rows: &[NewInterview]) -> Result<u64, AppError> {
            if self.fail {
                return Err(AppError::Sheets("insert refused".to_string()));
            }
            let mut inserted = self.inserted.lock().unwrap();
            inserted.extend_from_slice(rows);
            Ok(rows.len() as u64)
        }
    }

    fn params(sheet_name: Option<&str>) -> ImportParams {
        ImportParams {
            spreadsheet_id: "sheet-id".to_string(),
            sheet_name: sheet_name.map(|s| s.to_string()),
            access_token: "token".to_string(),
            user_id: Uuid::nil(),
        }
    }

    #[tokio::test]
    async fn test_import_end_to_end() {
        let sheets = FakeSheets::new(
            &["Sheet1"],
            &[
                &["company", "role", "date", "status"],
                &["Acme", "Engineer", "01/15/2025", "applied"],
                &["", "Dev", "2025-02-01", "offer"],
            ],
        );
        let store = FakeStore::default();

        let response = run_import(&sheets, &store, &params(None)).await.unwrap();

        assert!(response.success);
        assert_eq!(response.summary.total, 2);
        assert_eq!(response.summary.imported, 1);
        assert_eq!(response.summary.skipped, 1);
        assert_eq!(response.summary.skipped_rows, vec![3]);
        assert!(response.summary.errors.is_empty());
        assert_eq!(response.summary.preview_data.len(), 1);
        assert_eq!(response.summary.preview_data[0].date_applied, "2025-01-15");
        assert_eq!(response.summary.preview_data[0].status.as_str(), "Applied");

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].company, "Acme");
    }

    #[tokio::test]
    async fn test_unknown_sheet_name_lists_available_sheets() {
        let sheets = FakeSheets::new(&["Sheet1", "Data"], &[]);
        let store = FakeStore::default();

        let err = run_import(&sheets, &store, &params(Some("Missing")))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Missing"));
        assert!(message.contains("Sheet1"));
        assert!(message.contains("Data"));
    }

    #[tokio::test]
    async fn test_defaults_to_first_sheet() {
        let sheets = FakeSheets::new(
            &["Tracker", "Archive"],
            &[&["company", "date"], &["Acme", "2025-01-15"]],
        );
        let store = FakeStore::default();

        let response = run_import(&sheets, &store, &params(None)).await.unwrap();
        assert_eq!(response.summary.imported, 1);
    }

    #[tokio::test]
    async fn test_empty_sheet_is_rejected() {
        let sheets = FakeSheets::new(&["Sheet1"], &[]);
        let store = FakeStore::default();

        let err = run_import(&sheets, &store, &params(None)).await.unwrap_err();
        assert!(err.to_string().contains("No data found"));
    }

    #[tokio::test]
    async fn test_missing_required_columns_reports_found_headers() {
        let sheets = FakeSheets::new(&["Sheet1"], &[&["Name", "Notes"], &["Acme", "hi"]]);
        let store = FakeStore::default();

        let err = run_import(&sheets, &store, &params(None)).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name"));
        assert!(message.contains("notes"));
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_header_only_sheet_imports_nothing() {
        let sheets = FakeSheets::new(&["Sheet1"], &[&["company", "date"]]);
        let store = FakeStore::default();

        let response = run_import(&sheets, &store, &params(None)).await.unwrap();
        assert_eq!(response.summary.total, 0);
        assert_eq!(response.summary.imported, 0);
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_rows_skipped_performs_no_insert() {
        let sheets = FakeSheets::new(
            &["Sheet1"],
            &[&["company", "date"], &["", "2025-01-01"], &["Acme", ""]],
        );
        let store = FakeStore {
            fail: true, // an insert attempt would fail the test
            ..Default::default()
        };

        let response = run_import(&sheets, &store, &params(None)).await.unwrap();
        assert_eq!(response.summary.imported, 0);
        assert_eq!(response.summary.skipped, 2);
        assert_eq!(response.summary.skipped_rows, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_row_error_lands_in_errors_and_skips() {
        let sheets = FakeSheets::new(
            &["Sheet1"],
            &[
                &["company", "date"],
                &["   ", "2025-01-01"],
                &["Acme", "2025-01-02"],
            ],
        );
        let store = FakeStore::default();

        let response = run_import(&sheets, &store, &params(None)).await.unwrap();
        assert_eq!(response.summary.imported, 1);
        assert_eq!(response.summary.skipped, 1);
        assert_eq!(response.summary.errors.len(), 1);
        assert!(response.summary.errors[0].starts_with("Row 2:"));
    }

    #[tokio::test]
    async fn test_insert_failure_aborts_the_import() {
        let sheets = FakeSheets::new(
            &["Sheet1"],
            &[&["company", "date"], &["Acme", "2025-01-15"]],
        );
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };

        assert!(run_import(&sheets, &store, &params(None)).await.is_err());
    }

    #[tokio::test]
    async fn test_preview_matches_import_transform() {
        let rows: &[&[&str]] = &[
            &["company", "role", "date", "status"],
            &["Acme", "Engineer", "01/15/2025", "applied"],
            &["", "Dev", "2025-02-01", "offer"],
            &["Globex", "PM", "25/03/2025", "Interviewing Round 2"],
        ];
        let sheets = FakeSheets::new(&["Sheet1"], rows);
        let store = FakeStore::default();

        let preview = run_preview(&sheets, &params(None)).await.unwrap();
        let import = run_import(&sheets, &store, &params(None)).await.unwrap();

        assert_eq!(preview.total, import.summary.total);
        assert_eq!(preview.skipped_rows, import.summary.skipped_rows);
        assert_eq!(preview.records, *store.inserted.lock().unwrap());
        assert_eq!(preview.records[1].date_applied, "2025-03-25");
        assert_eq!(preview.records[1].status.as_str(), "Interviewing");
    }

    #[tokio::test]
    async fn test_preview_performs_no_insert() {
        let sheets = FakeSheets::new(
            &["Sheet1"],
            &[&["company", "date"], &["Acme", "2025-01-15"]],
        );

        let preview = run_preview(&sheets, &params(None)).await.unwrap();
        assert_eq!(preview.records.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_caps_nothing_import_previews_five() {
        let mut rows: Vec<Vec<String>> = vec![vec!["company".into(), "date".into()]];
        for i in 0..8 {
            rows.push(vec![format!("Company {i}"), "2025-01-15".into()]);
        }
        let sheets = FakeSheets {
            titles: vec!["Sheet1".to_string()],
            rows,
        };
        let store = FakeStore::default();

        let preview = run_preview(&sheets, &params(None)).await.unwrap();
        let import = run_import(&sheets, &store, &params(None)).await.unwrap();

        assert_eq!(preview.records.len(), 8);
        assert_eq!(import.summary.imported, 8);
        assert_eq!(import.summary.preview_data.len(), 5);
    }

    #[test]
    fn test_summary_serializes_with_original_wire_keys() {
        let summary = ImportSummary {
            total: 2,
            imported: 1,
            skipped: 1,
            skipped_rows: vec![3],
            errors: vec![],
            preview_data: vec![],
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["skippedRows"], serde_json::json!([3]));
        assert_eq!(value["total"], 2);
        assert!(value.get("previewData").is_some());

        let response = ImportResponse {
            success: true,
            summary,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["summary"].get("skippedRows").is_some());
    }
}
