//! Gemini REST client.
//!
//! Uploads go through the resumable Files API protocol (a `start` request
//! that returns a session URL, then a single `upload, finalize` request).
//! Generation uses `models/{model}:generateContent` with the uploaded file
//! referenced by URI.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};
use vprompt_models::{MediaAsset, RemoteFile};

use crate::error::{GeminiError, GeminiResult};
use crate::service::InferenceService;
use crate::types::{
    Content, GenerateRequest, GenerateResponse, Part, UploadFileMetadata, UploadResponse,
    UploadStartRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Gemini client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> GeminiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config = config.with_model(model);
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        config.timeout = Duration::from_secs(
            std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        );
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create a new Gemini client from environment variables.
    pub fn from_env() -> GeminiResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.config.base_url, name)
    }

    fn key_query(&self) -> [(&'static str, &str); 1] {
        [("key", self.config.api_key.as_str())]
    }

    /// Turn a non-2xx response into an API error carrying the body.
    async fn check_status(response: Response) -> GeminiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(GeminiError::api(status, message))
    }

    async fn generate(&self, parts: Vec<Part>) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        debug!(model = %self.config.model, "Calling generateContent");
        let response = self
            .client
            .post(&url)
            .query(&self.key_query())
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: GenerateResponse = response.json().await.map_err(|e| {
            GeminiError::invalid_response(format!("Failed to parse generateContent body: {}", e))
        })?;

        body.text().ok_or(GeminiError::EmptyResponse)
    }
}

#[async_trait]
impl InferenceService for GeminiClient {
    async fn upload_file(&self, asset: &MediaAsset) -> GeminiResult<RemoteFile> {
        let bytes = tokio::fs::read(asset.path()).await?;
        info!(
            file = %asset.file_name(),
            bytes = bytes.len(),
            mime_type = asset.mime_type(),
            "Uploading file to Gemini"
        );

        let start = self
            .client
            .post(format!("{}/upload/v1beta/files", self.config.base_url))
            .query(&self.key_query())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", asset.mime_type())
            .json(&UploadStartRequest {
                file: UploadFileMetadata {
                    display_name: asset.file_name(),
                },
            })
            .send()
            .await?;
        let start = Self::check_status(start).await?;

        let upload_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| GeminiError::invalid_response("Upload start returned no session URL"))?;

        let response = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            GeminiError::invalid_response(format!("Failed to parse upload response: {}", e))
        })?;

        info!(name = %uploaded.file.name, state = %uploaded.file.state, "Upload complete");
        Ok(uploaded.file)
    }

    async fn get_file(&self, name: &str) -> GeminiResult<RemoteFile> {
        let response = self
            .client
            .get(self.file_url(name))
            .query(&self.key_query())
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            GeminiError::invalid_response(format!("Failed to parse file metadata: {}", e))
        })
    }

    async fn delete_file(&self, name: &str) -> GeminiResult<()> {
        let response = self
            .client
            .delete(self.file_url(name))
            .query(&self.key_query())
            .send()
            .await?;
        Self::check_status(response).await?;
        debug!(name, "Deleted remote file");
        Ok(())
    }

    async fn generate_with_file(&self, file: &RemoteFile, prompt: &str) -> GeminiResult<String> {
        self.generate(vec![Part::file(file), Part::text(prompt)]).await
    }

    async fn generate_text(&self, prompt: &str) -> GeminiResult<String> {
        self.generate(vec![Part::text(prompt)]).await
    }
}
