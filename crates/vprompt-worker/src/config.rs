//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

use vprompt_media::DEFAULT_EXTRACT_TIMEOUT;

use crate::upload::UploadConfig;

/// Video used when none is given on the command line or in the environment.
pub const DEFAULT_VIDEO_PATH: &str = "test_videos/IMG_0889.mp4";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source video
    pub video_path: PathBuf,
    /// Root for `frames/` and `prompts/`
    pub output_dir: PathBuf,
    /// Upload polling and remote cleanup
    pub upload: UploadConfig,
    /// Time budget for one FFmpeg extraction
    pub ffmpeg_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from(DEFAULT_VIDEO_PATH),
            output_dir: PathBuf::from("output"),
            upload: UploadConfig::default(),
            ffmpeg_timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            video_path: std::env::var("VPROMPT_VIDEO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_path),
            output_dir: std::env::var("VPROMPT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            upload: UploadConfig {
                poll_interval: env_secs("VPROMPT_POLL_INTERVAL_SECS")
                    .unwrap_or(defaults.upload.poll_interval),
                max_wait: env_secs("VPROMPT_POLL_MAX_WAIT_SECS")
                    .unwrap_or(defaults.upload.max_wait),
                delete_remote: std::env::var("VPROMPT_DELETE_REMOTE")
                    .ok()
                    .and_then(|s| parse_bool(&s))
                    .unwrap_or(true),
            },
            ffmpeg_timeout: env_secs("VPROMPT_FFMPEG_TIMEOUT_SECS")
                .unwrap_or(defaults.ffmpeg_timeout),
        }
    }

    /// Override the source video, e.g. from a positional argument.
    pub fn with_video_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.video_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Directory extracted frames are written to.
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Directory prompt records are written to.
    pub fn prompts_dir(&self) -> PathBuf {
        self.output_dir.join("prompts")
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    std::env::var(key).ok().and_then(|s| parse_secs(&s))
}

/// Whole seconds, strictly positive.
fn parse_secs(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
