use serde::{Deserialize, Serialize};

/// Resume text on its way to the analyzer. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    resume_text: String,
}

impl AnalysisRequest {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(resume_text: impl Into<String>) -> Option<Self> {
        let resume_text = resume_text.into();
        if resume_text.trim().is_empty() {
            None
        } else {
            Some(Self { resume_text })
        }
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }
}

/// The model's feedback, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub feedback_markdown: String,
}
