//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;
use vprompt_gemini::GeminiError;
use vprompt_media::MediaError;
use vprompt_models::RemoteFileState;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Failed to create inference client: {0}")]
    ClientSetup(String),

    #[error("Source video not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Timeout: file processing took longer than {0} seconds")]
    ProcessingTimeout(u64),

    #[error("File processing failed for {0}: file may be corrupted or in an unsupported format")]
    ProcessingFailed(String),

    #[error("Unexpected file state: {0}")]
    UnexpectedRemoteState(RemoteFileState),

    #[error("AI analysis failed: {0}")]
    AnalysisFailed(String),

    #[error(
        "No suitable single-person frame found (timestamp: {timestamp:?}, people: {people_count})"
    )]
    NoSinglePersonFrame {
        timestamp: Option<f64>,
        people_count: u32,
    },

    #[error("Frame extraction failed: {0}")]
    ExtractionFailed(#[from] MediaError),

    /// Recovered inside the prompt pipeline; never returned from a run.
    #[error("Candidate selection failed: {0}")]
    SelectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Map a client construction error. Only a missing key is a credential
    /// problem.
    pub fn client_setup(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => Self::MissingCredential(
                "GEMINI_API_KEY environment variable is not set".to_string(),
            ),
            other => Self::ClientSetup(other.to_string()),
        }
    }

    pub fn upload(err: GeminiError) -> Self {
        Self::UploadFailed(err.to_string())
    }

    pub fn analysis(err: GeminiError) -> Self {
        Self::AnalysisFailed(err.to_string())
    }

    pub fn selection(msg: impl Into<String>) -> Self {
        Self::SelectionFailed(msg.into())
    }

    /// Whether the error aborts a run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PipelineError::SelectionFailed(_))
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::MissingCredential(_) => 2,
            _ => 1,
        }
    }

    /// Diagnostic output from the external tool, if any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            PipelineError::ExtractionFailed(e) => e.diagnostics(),
            _ => None,
        }
    }
}
