//! Single-frame extraction.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// JPEG quality scale passed to `-q:v`.
pub const FRAME_JPEG_QUALITY: u8 = 2;

/// Default time budget for one extraction.
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);

/// File name for a frame taken from `stem` at `timestamp` seconds.
pub fn frame_file_name(stem: &str, timestamp: f64) -> String {
    format!("{}_person_{:.1}s.jpg", stem, timestamp)
}

/// Materializes one frame of a video as an image file.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    /// Write the frame at `timestamp` seconds of `source` to `output`.
    ///
    /// Succeeds only if the tool exited cleanly and `output` exists.
    async fn extract_frame(&self, source: &Path, timestamp: f64, output: &Path) -> MediaResult<()>;
}

/// [`FrameExtractor`] backed by the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    runner: FfmpegRunner,
}

impl FfmpegFrameExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            runner: FfmpegRunner::new().with_timeout(timeout),
        }
    }

    pub fn with_runner(runner: FfmpegRunner) -> Self {
        Self { runner }
    }

    /// The command this extractor runs.
    pub fn command(source: &Path, timestamp: f64, output: &Path) -> FfmpegCommand {
        FfmpegCommand::new(source, output)
            .seek(timestamp)
            .single_frame()
            .quality(FRAME_JPEG_QUALITY)
            .overwrite(true)
            .log_level("error")
    }
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    async fn extract_frame(&self, source: &Path, timestamp: f64, output: &Path) -> MediaResult<()> {
        let cmd = Self::command(source, timestamp, output);
        self.runner.run(&cmd).await?;

        if !tokio::fs::try_exists(output).await? {
            return Err(MediaError::OutputMissing(output.to_path_buf()));
        }

        info!(output = %output.display(), timestamp, "Extracted frame");
        Ok(())
    }
}
