//! Video analysis pipelines.
//!
//! Two independent, strictly sequential pipelines share one shape:
//! upload → analyze → parse → select → materialize/save.
//!
//! - [`PersonFrameExtractor`]: finds a moment with exactly one clearly
//!   visible person and extracts that frame with FFmpeg.
//! - [`PromptGenerator`]: produces three raw descriptions, picks the most
//!   accurate one, and rewrites it into anime and space styles.

pub mod config;
pub mod error;
pub mod frame_pipeline;
pub mod instructions;
pub mod logging;
pub mod parse;
pub mod prompt_pipeline;
pub mod select;
pub mod upload;
pub mod writer;

#[cfg(test)]
mod testing;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use frame_pipeline::PersonFrameExtractor;
pub use logging::{init_tracing, RunLogger};
pub use prompt_pipeline::{PromptGenerator, PromptOutcome};
pub use upload::{upload_and_wait, PollStep, UploadConfig};
