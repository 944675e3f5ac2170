//! Axum route handlers for the Resume Analyzer API.
//!
//! Each request runs through its own `AnalyzerSession`: load text (pasted or
//! extracted from an upload), submit once, render.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analyzer::extract::{extract_blocking, Document};
use crate::analyzer::render::render_markdown;
use crate::analyzer::session::AnalyzerSession;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub feedback_markdown: String,
    pub feedback_html: String,
}

impl From<&AnalysisResult> for AnalyzeResponse {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            feedback_markdown: result.feedback_markdown.clone(),
            feedback_html: render_markdown(&result.feedback_markdown),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;

    let mut session = AnalyzerSession::new();
    session.set_text(request.resume_text);

    let result = session.submit(state.analyzer.as_ref()).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/resume/analyze/upload
///
/// Extracts text from the uploaded file, then analyzes it. An unreadable file
/// is reported as an extraction error and never reaches the analyzer.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let document = read_resume_field(multipart?, state.config.max_upload_bytes).await?;

    let mut session = AnalyzerSession::new();
    session.load_extracted(extract_blocking(state.extractor.clone(), document).await)?;

    let result = session.submit(state.analyzer.as_ref()).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/resume/extract
///
/// Returns the text of the uploaded file so the client can review or edit it before analysis.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let document = read_resume_field(multipart?, state.config.max_upload_bytes).await?;
    let resume_text = extract_blocking(state.extractor.clone(), document).await?;
    Ok(Json(ExtractResponse { resume_text }))
}

async fn read_resume_field(mut multipart: Multipart, limit: usize) -> Result<Document, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, limit))?;

        return Ok(Document {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

/// Oversized bodies keep their 413; anything else is a malformed upload.
fn upload_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}
