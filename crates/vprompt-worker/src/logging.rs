//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default levels: the library crates plus the two binary targets.
const LOG_DIRECTIVES: [&str; 3] = [
    "vprompt=info",
    "extract_person_frame=info",
    "generate_prompts=info",
];

/// Initialize tracing: colored output for dev, JSON when `LOG_FORMAT=json`.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Run logger for structured logging with consistent formatting.
///
/// Every event carries the video being processed and the pipeline name.
#[derive(Debug, Clone)]
pub struct RunLogger {
    video: String,
    pipeline: &'static str,
}

impl RunLogger {
    /// Create a new run logger for a video and pipeline.
    pub fn new(video: impl Into<String>, pipeline: &'static str) -> Self {
        Self {
            video: video.into(),
            pipeline,
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(video = %self.video, pipeline = self.pipeline, "Run started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(video = %self.video, pipeline = self.pipeline, "{}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(video = %self.video, pipeline = self.pipeline, "{}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(video = %self.video, pipeline = self.pipeline, "Run failed: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(video = %self.video, pipeline = self.pipeline, "Run completed: {}", message);
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("run", video = %self.video, pipeline = self.pipeline)
    }
}
