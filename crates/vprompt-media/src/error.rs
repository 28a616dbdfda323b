//! Error types for media operations.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found: {0}")]
    FfmpegNotFound(String),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFmpeg timed out after {after:?}")]
    Timeout {
        after: Duration,
        /// Diagnostics written before the process was killed
        stderr: Option<String>,
    },

    #[error("FFmpeg reported success but produced no file at {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// FFmpeg's own diagnostic output, when it was captured.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            MediaError::FfmpegFailed {
                stderr: Some(stderr),
                ..
            }
            | MediaError::Timeout {
                stderr: Some(stderr),
                ..
            } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}
