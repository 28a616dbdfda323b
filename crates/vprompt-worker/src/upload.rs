//! Upload a source video and wait for the remote copy to become usable.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};
use vprompt_gemini::InferenceService;
use vprompt_models::{MediaAsset, RemoteFile, RemoteFileState};

use crate::error::{PipelineError, PipelineResult};
use crate::logging::RunLogger;

/// Upload polling and cleanup settings.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Sleep between state checks
    pub poll_interval: Duration,
    /// Give up once this much time was spent waiting while still processing
    pub max_wait: Duration,
    /// Delete the remote copy once the run no longer needs it
    pub delete_remote: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(60),
            delete_remote: true,
        }
    }
}

/// What to do after observing a remote file state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// `ACTIVE`: the file can be analyzed
    Ready,
    /// `PROCESSING` within budget: sleep and re-query
    Wait,
    /// `PROCESSING` with the wait budget spent
    TimedOut,
    /// `FAILED`
    Failed,
    /// Any other state
    Unexpected,
}

impl PollStep {
    /// Transition for `state` after `waited` of a `max_wait` budget.
    pub fn next(state: RemoteFileState, waited: Duration, max_wait: Duration) -> Self {
        match state {
            RemoteFileState::Active => PollStep::Ready,
            RemoteFileState::Processing if waited >= max_wait => PollStep::TimedOut,
            RemoteFileState::Processing => PollStep::Wait,
            RemoteFileState::Failed => PollStep::Failed,
            RemoteFileState::Unknown => PollStep::Unexpected,
        }
    }
}

/// Upload `asset` and block until the remote copy is `ACTIVE`.
///
/// Nothing is sent when the local file is missing. On a terminal failure
/// after upload the remote copy is released before returning.
pub async fn upload_and_wait(
    service: &dyn InferenceService,
    asset: &MediaAsset,
    config: &UploadConfig,
    logger: &RunLogger,
) -> PipelineResult<RemoteFile> {
    if !asset.exists() {
        return Err(PipelineError::SourceNotFound(asset.path().to_path_buf()));
    }

    logger.log_progress(&format!("Uploading {}", asset.file_name()));
    let mut file = service
        .upload_file(asset)
        .await
        .map_err(PipelineError::upload)?;
    logger.log_progress(&format!("Upload complete: {}", file.name));

    // Wall-clock budget, so a zero interval still ends at the ceiling.
    let started = Instant::now();
    loop {
        let waited = started.elapsed();
        let error = match PollStep::next(file.state, waited, config.max_wait) {
            PollStep::Ready => {
                logger.log_progress(&format!(
                    "File is ready for analysis (took {}s)",
                    waited.as_secs()
                ));
                return Ok(file);
            }
            PollStep::Wait => {
                debug!(name = %file.name, waited_secs = waited.as_secs(), "Still processing");
                tokio::time::sleep(config.poll_interval).await;
                file = match service.get_file(&file.name).await {
                    Ok(refreshed) => refreshed,
                    Err(e) => {
                        let error = PipelineError::upload(e);
                        release_remote(service, &file, config).await;
                        return Err(error);
                    }
                };
                continue;
            }
            PollStep::TimedOut => PipelineError::ProcessingTimeout(config.max_wait.as_secs()),
            PollStep::Failed => PipelineError::ProcessingFailed(file.name.clone()),
            PollStep::Unexpected => PipelineError::UnexpectedRemoteState(file.state),
        };

        release_remote(service, &file, config).await;
        return Err(error);
    }
}

/// Delete the remote copy if configured to. Failures are only logged.
pub async fn release_remote(
    service: &dyn InferenceService,
    file: &RemoteFile,
    config: &UploadConfig,
) {
    if !config.delete_remote {
        return;
    }
    match service.delete_file(&file.name).await {
        Ok(()) => debug!(name = %file.name, "Released remote file"),
        Err(e) => warn!(name = %file.name, "Failed to delete remote file: {}", e),
    }
}
