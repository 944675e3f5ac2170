use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::jobs::store::JobFilter;
use crate::jobs::validation::PostJobForm;
use crate::models::job::{CompanyRow, JobRow};
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    payload: Result<Json<PostJobForm>, JsonRejection>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let Json(form) = payload?;
    let new_job = form.validate().map_err(|errors| {
        let message = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    })?;

    let job = state.jobs.create_job(&new_job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let Query(filter) = query?;
    Ok(Json(state.jobs.list_jobs(&filter).await?))
}

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    Ok(Json(state.jobs.list_companies().await?))
}
