//! Scripted collaborators for pipeline tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use vprompt_gemini::{GeminiError, GeminiResult, InferenceService};
use vprompt_media::{FrameExtractor, MediaError, MediaResult};
use vprompt_models::{MediaAsset, RemoteFile, RemoteFileState};

/// Inference service answering from queues of canned responses.
///
/// `None` entries fail the call. An exhausted queue fails too.
#[derive(Default)]
pub struct ScriptedService {
    file_responses: Mutex<VecDeque<Option<String>>>,
    text_responses: Mutex<VecDeque<Option<String>>>,
    pub prompts: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<PathBuf>>,
    pub deleted: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next answer to a question about the uploaded file.
    pub fn file_reply(self, text: &str) -> Self {
        self.file_responses
            .lock()
            .unwrap()
            .push_back(Some(text.to_string()));
        self
    }

    pub fn file_failure(self) -> Self {
        self.file_responses.lock().unwrap().push_back(None);
        self
    }

    /// Next answer to a text-only request.
    pub fn text_reply(self, text: &str) -> Self {
        self.text_responses
            .lock()
            .unwrap()
            .push_back(Some(text.to_string()));
        self
    }

    pub fn text_failure(self) -> Self {
        self.text_responses.lock().unwrap().push_back(None);
        self
    }

    pub fn remote_file() -> RemoteFile {
        RemoteFile {
            name: "files/scripted".to_string(),
            display_name: None,
            uri: "https://example.test/v1beta/files/scripted".to_string(),
            mime_type: "video/mp4".to_string(),
            state: RemoteFileState::Active,
        }
    }

    fn next(queue: &Mutex<VecDeque<Option<String>>>) -> GeminiResult<String> {
        match queue.lock().unwrap().pop_front() {
            Some(Some(text)) => Ok(text),
            Some(None) => Err(GeminiError::api(503, "scripted failure")),
            None => Err(GeminiError::api(500, "no scripted response left")),
        }
    }
}

#[async_trait]
impl InferenceService for ScriptedService {
    async fn upload_file(&self, asset: &MediaAsset) -> GeminiResult<RemoteFile> {
        self.uploads.lock().unwrap().push(asset.path().to_path_buf());
        Ok(Self::remote_file())
    }

    async fn get_file(&self, _name: &str) -> GeminiResult<RemoteFile> {
        Ok(Self::remote_file())
    }

    async fn delete_file(&self, name: &str) -> GeminiResult<()> {
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn generate_with_file(&self, _file: &RemoteFile, prompt: &str) -> GeminiResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Self::next(&self.file_responses)
    }

    async fn generate_text(&self, prompt: &str) -> GeminiResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Self::next(&self.text_responses)
    }
}

/// One recorded extraction request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractCall {
    pub source: PathBuf,
    pub timestamp: f64,
    pub output: PathBuf,
}

/// Frame extractor that records calls and writes a placeholder image.
#[derive(Default)]
pub struct RecordingExtractor {
    pub calls: Mutex<Vec<ExtractCall>>,
    fail_with: Option<String>,
}

impl RecordingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call as a non-zero FFmpeg exit with this stderr.
    pub fn failing(stderr: &str) -> Self {
        Self {
            calls: Mutex::default(),
            fail_with: Some(stderr.to_string()),
        }
    }
}

#[async_trait]
impl FrameExtractor for RecordingExtractor {
    async fn extract_frame(&self, source: &Path, timestamp: f64, output: &Path) -> MediaResult<()> {
        self.calls.lock().unwrap().push(ExtractCall {
            source: source.to_path_buf(),
            timestamp,
            output: output.to_path_buf(),
        });

        if let Some(stderr) = &self.fail_with {
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr.clone()),
                Some(1),
            ));
        }

        tokio::fs::write(output, b"\xFF\xD8\xFF\xD9").await?;
        Ok(())
    }
}
