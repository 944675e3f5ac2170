//! Shared fixtures for router tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::analyzer::client::ResumeAnalyzer;
use crate::analyzer::extract::TextExtractor;
use crate::config::Config;
use crate::jobs::store::{JobFilter, JobStore, StoreError};
use crate::models::job::{CompanyRow, JobRow, NewJob};
use crate::state::AppState;

pub fn test_config() -> Config {
    Config {
        supabase_url: "http://127.0.0.1:1".to_string(),
        supabase_anon_key: "anon-key".to_string(),
        gemini_api_key: Some("test-key".to_string()),
        gemini_model: "gemini-pro".to_string(),
        gemini_api_base: "http://127.0.0.1:1".to_string(),
        analysis_timeout: Duration::from_secs(1),
        max_upload_bytes: 1024 * 1024,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    analyzer: Arc<dyn ResumeAnalyzer>,
    extractor: Arc<dyn TextExtractor>,
    jobs: Arc<dyn JobStore>,
) -> AppState {
    AppState {
        analyzer,
        extractor,
        jobs,
        config: test_config(),
    }
}

/// For tests that must not touch the job backend.
pub struct UnreachableJobStore;

#[async_trait]
impl JobStore for UnreachableJobStore {
    async fn create_job(&self, _job: &NewJob) -> Result<JobRow, StoreError> {
        panic!("job store must not be called")
    }

    async fn list_jobs(&self, _filter: &JobFilter) -> Result<Vec<JobRow>, StoreError> {
        panic!("job store must not be called")
    }

    async fn list_companies(&self) -> Result<Vec<CompanyRow>, StoreError> {
        panic!("job store must not be called")
    }
}
