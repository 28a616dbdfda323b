//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Set seek position after the input, so FFmpeg decodes up to the exact
    /// offset instead of snapping to the previous keyframe.
    pub fn seek(self, seconds: f64) -> Self {
        self.output_arg("-ss").output_arg(seconds.to_string())
    }

    /// Extract single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-frames:v").output_arg("1")
    }

    /// Set video quality scale (2 is near-lossless for JPEG).
    pub fn quality(self, q: u8) -> Self {
        self.output_arg("-q:v").output_arg(q.to_string())
    }

    /// Set whether an existing output file is replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        } else {
            args.push("-n".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands with a hard timeout.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    /// Executable name or path
    program: String,
    timeout: Option<Duration>,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            timeout: None,
        }
    }

    /// Use a different executable (e.g. a pinned FFmpeg build).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill the process if it has not finished after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run an FFmpeg command, capturing stderr for diagnostics.
    ///
    /// On timeout the process is killed and whatever it wrote to stderr so
    /// far is attached to the error.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        let program = which::which(&self.program)
            .map_err(|_| MediaError::FfmpegNotFound(self.program.clone()))?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", program.display(), args.join(" "));

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stderr = StderrCapture::start(child.stderr.take());

        let status = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, child.wait()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!("FFmpeg timed out after {:?}, killing process", timeout);
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill FFmpeg: {}", e);
                    }
                    return Err(MediaError::Timeout {
                        after: timeout,
                        stderr: stderr.abort(),
                    });
                }
            },
            None => child.wait().await?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                stderr.finish().await,
                status.code(),
            ))
        }
    }
}

/// Background reader collecting a child's stderr as it arrives.
struct StderrCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl StderrCapture {
    fn start<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let task = pipe.map(|mut pipe| {
            let buffer = Arc::clone(&buffer);
            tokio::spawn(async move {
                let mut chunk = [0u8; 4096];
                loop {
                    match pipe.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            if let Ok(mut buf) = buffer.lock() {
                                buf.extend_from_slice(&chunk[..n]);
                            }
                        }
                    }
                }
            })
        });
        Self { buffer, task }
    }

    /// Wait for end of stream and return the text.
    async fn finish(mut self) -> Option<String> {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.text()
    }

    /// Stop reading and return what was captured so far.
    ///
    /// The pipe may stay open after a kill if FFmpeg left children behind,
    /// so this never waits for end of stream.
    fn abort(mut self) -> Option<String> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.text()
    }

    fn text(&self) -> Option<String> {
        let buf = self.buffer.lock().ok()?;
        let text = String::from_utf8_lossy(&buf).trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound("ffmpeg".to_string()))
}
