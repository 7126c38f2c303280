use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::import::orchestrator::{
    run_import, run_preview, ImportParams, ImportResponse, PreviewResponse,
};
use crate::state::AppState;

/// Request body shared by preview and committed import. The spreadsheet may
/// be identified by bare id or by a full Google Sheets URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub spreadsheet_id: Option<String>,
    pub spreadsheet_url: Option<String>,
    pub sheet_name: Option<String>,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

/// Pulls the spreadsheet id out of a sharing URL
/// (`https://docs.google.com/spreadsheets/d/<id>/edit...`).
fn extract_spreadsheet_id(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/d/")?;
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!id.is_empty()).then_some(id)
}

/// Checks request parameters before any network call; the error names the
/// parameter so the caller can fix its request.
fn validate_params(request: &ImportRequest) -> Result<ImportParams, AppError> {
    let spreadsheet_id = match (&request.spreadsheet_id, &request.spreadsheet_url) {
        (Some(id), _) if !id.is_empty() => id.clone(),
        (_, Some(url)) if !url.is_empty() => extract_spreadsheet_id(url).ok_or_else(|| {
            AppError::Validation(
                "Invalid spreadsheetUrl. Provide a valid Google Sheets URL.".to_string(),
            )
        })?,
        _ => {
            return Err(AppError::Validation(
                "Missing required parameter: spreadsheetId".to_string(),
            ))
        }
    };

    let access_token = request
        .access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Missing required parameter: accessToken".to_string())
        })?
        .to_string();

    let user_id = request
        .user_id
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required parameter: userId".to_string()))?;
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| AppError::Validation("userId must be a valid UUID".to_string()))?;

    Ok(ImportParams {
        spreadsheet_id,
        sheet_name: request.sheet_name.clone().filter(|n| !n.is_empty()),
        access_token,
        user_id,
    })
}

/// POST /api/v1/import/sheets
pub async fn handle_import(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let params = validate_params(&request)?;
    info!(
        "Importing spreadsheet {} (sheet: {:?}) for user {}",
        params.spreadsheet_id, params.sheet_name, params.user_id
    );
    let response = run_import(state.sheets.as_ref(), state.store.as_ref(), &params).await?;
    info!(
        "Import finished: {} of {} rows imported",
        response.summary.imported, response.summary.total
    );
    Ok(Json(response))
}

/// POST /api/v1/import/sheets/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let params = validate_params(&request)?;
    let response = run_preview(state.sheets.as_ref(), &params).await?;
    Ok(Json(response))
}
