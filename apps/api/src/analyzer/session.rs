#![allow(dead_code)]

//! Analyzer session — the state behind one analyzer page.
//!
//! Holds the current resume text, whether a submission is in flight, the last
//! user-facing error and the last result. A submission clears the previous
//! error, so a failed analysis can simply be resubmitted.

use thiserror::Error;

use crate::analyzer::client::{AnalysisError, ResumeAnalyzer};
use crate::analyzer::extract::ExtractionError;
use crate::errors::EXTRACTION_FAILED_MESSAGE;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Resume text cannot be empty")]
    EmptyResume,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("{}", EXTRACTION_FAILED_MESSAGE)]
    Extraction(#[source] ExtractionError),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    InFlight,
}

/// Proof that `begin_submit` succeeded. Consumed by `complete`.
#[derive(Debug)]
pub struct Submission {
    request: AnalysisRequest,
}

impl Submission {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct AnalyzerSession {
    resume_text: String,
    phase: Phase,
    error: Option<String>,
    result: Option<AnalysisResult>,
}

impl Default for AnalyzerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerSession {
    pub fn new() -> Self {
        Self {
            resume_text: String::new(),
            phase: Phase::Idle,
            error: None,
            result: None,
        }
    }

    /// Pasted text replaces whatever was there.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.resume_text = text.into();
    }

    /// Applies the outcome of extracting an uploaded file. On failure the
    /// current text is left untouched and the error is recorded.
    pub fn load_extracted(
        &mut self,
        outcome: Result<String, ExtractionError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(text) => {
                self.resume_text = text;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                let err = SessionError::Extraction(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::InFlight
    }

    /// Whether the analyze trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.resume_text.trim().is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Starts a submission: clears the previous error and marks the session in flight.
    pub fn begin_submit(&mut self) -> Result<Submission, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        let request =
            AnalysisRequest::new(self.resume_text.clone()).ok_or(SessionError::EmptyResume)?;

        self.phase = Phase::InFlight;
        self.error = None;
        Ok(Submission { request })
    }

    /// Records the analyzer's outcome. Previous results are replaced only on success.
    pub fn complete(
        &mut self,
        _submission: Submission,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<&AnalysisResult, SessionError> {
        self.phase = Phase::Idle;
        match outcome {
            Ok(result) => Ok(self.result.insert(result)),
            Err(e) => {
                let err = SessionError::Analysis(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// `begin_submit`, one analyzer call, `complete`.
    pub async fn submit(
        &mut self,
        analyzer: &dyn ResumeAnalyzer,
    ) -> Result<&AnalysisResult, SessionError> {
        let submission = self.begin_submit()?;
        let outcome = analyzer.analyze(submission.request()).await;
        self.complete(submission, outcome)
    }
}
