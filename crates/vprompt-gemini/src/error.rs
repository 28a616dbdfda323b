//! Gemini client error types.

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,

    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Gemini response: {0}")]
    InvalidResponse(String),

    #[error("No text content in Gemini response")]
    EmptyResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status for API errors.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            GeminiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
