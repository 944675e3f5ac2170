pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analyzer::handlers as analyzer;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume Analyzer API
        .route("/api/v1/resume/analyze", post(analyzer::handle_analyze))
        .route(
            "/api/v1/resume/analyze/upload",
            post(analyzer::handle_analyze_upload).layer(upload_limit),
        )
        .route(
            "/api/v1/resume/extract",
            post(analyzer::handle_extract).layer(upload_limit),
        )
        // Job board API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/companies", get(jobs::handle_list_companies))
        .with_state(state)
}
