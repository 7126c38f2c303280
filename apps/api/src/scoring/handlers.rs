use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM};
use crate::scoring::relevance::relevance_score;
use crate::scoring::resume::{parse_resume_text, ParsedResume};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u8,
}

/// POST /api/v1/resumes/score
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Json<ScoreResponse> {
    let score = relevance_score(&request.resume_text, &request.job_description);
    Json(ScoreResponse { score })
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload of a resume under the `file` field. PDFs go through text
/// extraction; anything else is read as plain UTF-8 text.
pub async fn handle_parse_resume(
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text = if looks_like_pdf(file_name.as_deref(), &data) {
            pdf_extract::extract_text_from_mem(&data).map_err(|e| {
                AppError::UnprocessableEntity(format!("Could not extract text from PDF: {e}"))
            })?
        } else {
            String::from_utf8(data.to_vec()).map_err(|_| {
                AppError::UnprocessableEntity(
                    "Resume file is neither a PDF nor UTF-8 text".to_string(),
                )
            })?
        };

        info!("Parsing uploaded resume ({} bytes of text)", text.len());
        return Ok(Json(parse_resume_text(&text)));
    }

    Err(AppError::Validation(
        "Missing required multipart field: file".to_string(),
    ))
}

fn looks_like_pdf(file_name: Option<&str>, data: &[u8]) -> bool {
    file_name
        .map(|name| name.to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
        || data.starts_with(b"%PDF")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_resume: String,
}

/// POST /api/v1/resumes/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }

    info!(
        "Enhancing resume text ({} chars)",
        request.resume_text.len()
    );
    let prompt = ENHANCE_PROMPT_TEMPLATE.replace("{resume_text}", &request.resume_text);
    let response = state
        .llm
        .call(&prompt, ENHANCE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume enhancement failed: {e}")))?;

    let enhanced = response
        .text()
        .ok_or_else(|| AppError::Llm("Enhancement returned no content".to_string()))?;

    Ok(Json(EnhanceResponse {
        enhanced_resume: enhanced.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_detection_by_extension_and_magic() {
        assert!(looks_like_pdf(Some("resume.pdf"), b"whatever"));
        assert!(looks_like_pdf(Some("Resume.PDF"), b"whatever"));
        assert!(looks_like_pdf(None, b"%PDF-1.7 ..."));
        assert!(!looks_like_pdf(Some("resume.txt"), b"plain text"));
        assert!(!looks_like_pdf(None, b"plain text"));
    }

    #[test]
    fn test_score_request_defaults_missing_fields_to_empty() {
        let request: ScoreRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(request.resume_text, "");
        assert_eq!(request.job_description, "");
    }

    #[test]
    fn test_enhance_response_uses_camel_case() {
        let response = EnhanceResponse {
            enhanced_resume: "better".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["enhancedResume"], "better");
    }
}
