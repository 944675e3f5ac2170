use std::sync::Arc;

use crate::analyzer::client::ResumeAnalyzer;
use crate::analyzer::extract::TextExtractor;
use crate::config::Config;
use crate::jobs::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: Gemini-backed `AnalysisClient`.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub extractor: Arc<dyn TextExtractor>,
    /// Job and company backend. Default: `PostgrestJobStore`.
    pub jobs: Arc<dyn JobStore>,
    pub config: Config,
}
