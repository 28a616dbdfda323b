//! The remote inference service seam.

use async_trait::async_trait;
use vprompt_models::{MediaAsset, RemoteFile};

use crate::error::GeminiResult;

/// Operations the pipelines need from the remote service.
///
/// Implementations hold their own credentials; callers construct one per run
/// and pass it down explicitly.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Upload a local file. The returned handle may still be `PROCESSING`.
    async fn upload_file(&self, asset: &MediaAsset) -> GeminiResult<RemoteFile>;

    /// Re-fetch a handle to observe its current state.
    async fn get_file(&self, name: &str) -> GeminiResult<RemoteFile>;

    /// Delete an uploaded file.
    async fn delete_file(&self, name: &str) -> GeminiResult<()>;

    /// Ask a question about an uploaded file.
    async fn generate_with_file(&self, file: &RemoteFile, prompt: &str) -> GeminiResult<String>;

    /// Text-only generation.
    async fn generate_text(&self, prompt: &str) -> GeminiResult<String>;
}
