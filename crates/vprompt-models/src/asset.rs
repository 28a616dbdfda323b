//! Local media asset.

use std::fmt;
use std::path::{Path, PathBuf};

/// Stem used when a path has no usable file stem.
const FALLBACK_STEM: &str = "video";

/// A video file on local disk, identified by its path and derived stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    path: PathBuf,
    stem: String,
}

impl MediaAsset {
    /// Create an asset for the given path. Existence is not checked here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());
        Self { path, stem }
    }

    /// Path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem, used to name output artifacts.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name including extension, for display and upload metadata.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.stem.clone())
    }

    /// Whether the file is present on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// MIME type guessed from the extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "mp4" | "m4v" => "video/mp4",
            "mov" => "video/quicktime",
            "webm" => "video/webm",
            "mkv" => "video/x-matroska",
            "avi" => "video/x-msvideo",
            "mpeg" | "mpg" => "video/mpeg",
            "3gp" => "video/3gpp",
            "flv" => "video/x-flv",
            "wmv" => "video/x-ms-wmv",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for MediaAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
