//! Analysis client — turns resume text into model feedback.
//!
//! `AppState` carries an `Arc<dyn ResumeAnalyzer>`; tests swap in fakes.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::analyzer::prompts::build_prompt;
use crate::llm_client::{LlmClient, LlmError, LlmSettings};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};

/// The only two outcomes a caller can observe besides success. Display text is user-facing.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("The resume analyzer is not configured. Please contact the site administrator.")]
    NotConfigured,

    #[error("Failed to analyze resume. Please try again later.")]
    Failed,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// Settings the analysis client is built from. `api_key: None` is a valid,
/// if useless, configuration.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: std::time::Duration,
}

/// Gemini-backed analyzer.
#[derive(Clone)]
pub struct AnalysisClient {
    llm: Option<LlmClient>,
}

impl AnalysisClient {
    pub fn new(settings: AnalysisSettings) -> Result<Self, LlmError> {
        let llm = match settings.api_key {
            Some(api_key) => Some(LlmClient::new(LlmSettings {
                api_key,
                model: settings.model,
                api_base: settings.api_base,
                timeout: settings.timeout,
            })?),
            None => None,
        };
        Ok(Self { llm })
    }

    pub fn model(&self) -> Option<&str> {
        self.llm.as_ref().map(LlmClient::model)
    }
}

#[async_trait]
impl ResumeAnalyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let llm = self.llm.as_ref().ok_or(AnalysisError::NotConfigured)?;

        let analysis_id = Uuid::new_v4();
        info!(
            %analysis_id,
            resume_chars = request.resume_text().chars().count(),
            "Analyzing resume"
        );

        let prompt = build_prompt(request.resume_text());
        match llm.call_text(&prompt).await {
            Ok(feedback_markdown) => {
                info!(%analysis_id, "Resume analysis complete");
                Ok(AnalysisResult { feedback_markdown })
            }
            Err(e) => {
                error!(%analysis_id, "Error analyzing resume with AI: {e}");
                Err(AnalysisError::Failed)
            }
        }
    }
}
