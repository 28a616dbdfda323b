//! Remote file handle returned by the inference service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteFileState {
    /// File is still being ingested
    Processing,
    /// File is ready for analysis
    Active,
    /// Ingestion failed (corrupt or unsupported)
    Failed,
    /// Unspecified or unrecognized state
    #[default]
    #[serde(rename = "STATE_UNSPECIFIED", other)]
    Unknown,
}

impl RemoteFileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteFileState::Processing => "PROCESSING",
            RemoteFileState::Active => "ACTIVE",
            RemoteFileState::Failed => "FAILED",
            RemoteFileState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RemoteFileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to a file held by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Resource name, e.g. `files/abc123`
    pub name: String,

    /// Display name given at upload time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// URI used to reference the file in generation requests
    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub state: RemoteFileState,
}
