use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analyzer::client::AnalysisError;
use crate::analyzer::extract::ExtractionError;
use crate::analyzer::session::SessionError;
use crate::jobs::store::StoreError;

pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Failed to read the uploaded file. Please ensure it's a valid PDF or text file and try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Only reachable through an `AnalyzerSession` shared across requests.
    /// Handlers build one session per request and never produce it.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Resume analyzer is not configured")]
    AnalyzerNotConfigured,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Resume analysis failed")]
    Analysis,

    #[error("Backend error: {0}")]
    Backend(#[from] StoreError),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NotConfigured => AppError::AnalyzerNotConfigured,
            AnalysisError::Failed => AppError::Analysis,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyResume => {
                AppError::Validation("resume_text cannot be empty".to_string())
            }
            SessionError::Busy => AppError::Conflict(SessionError::Busy.to_string()),
            SessionError::Extraction(e) => AppError::Extraction(e),
            SessionError::Analysis(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("The uploaded file is too large. The maximum size is {limit} bytes."),
            ),
            AppError::AnalyzerNotConfigured => {
                tracing::error!("Resume analysis requested but GEMINI_API_KEY is not set");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "ANALYZER_NOT_CONFIGURED",
                    AnalysisError::NotConfigured.to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    EXTRACTION_FAILED_MESSAGE.to_string(),
                )
            }
            // The client has already logged the cause under its analysis_id.
            AppError::Analysis => (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_ERROR",
                AnalysisError::Failed.to_string(),
            ),
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The job service is unavailable. Please try again later.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_map_to_distinct_kinds() {
        assert!(matches!(
            AppError::from(SessionError::EmptyResume),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(SessionError::Extraction(ExtractionError::NoText)),
            AppError::Extraction(_)
        ));
        assert!(matches!(
            AppError::from(SessionError::Analysis(AnalysisError::NotConfigured)),
            AppError::AnalyzerNotConfigured
        ));
        assert!(matches!(
            AppError::from(SessionError::Analysis(AnalysisError::Failed)),
            AppError::Analysis
        ));
    }

    #[test]
    fn test_status_codes() {
        let status = |err: AppError| err.into_response().status();
        assert_eq!(status(AppError::Analysis), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status(AppError::AnalyzerNotConfigured),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(AppError::Extraction(ExtractionError::EmptyFile)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(AppError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::PayloadTooLarge { limit: 10 }),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_busy_session_maps_to_conflict() {
        let err = AppError::from(SessionError::Busy);
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_extraction_message_covers_text_uploads() {
        assert!(EXTRACTION_FAILED_MESSAGE.contains("PDF or text file"));
    }
}
