//! FFmpeg CLI wrapper for frame extraction.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - A runner with a hard timeout that captures FFmpeg's diagnostics
//! - The [`FrameExtractor`] seam used by the frame pipeline

pub mod command;
pub mod error;
pub mod frame;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use frame::{
    frame_file_name, FfmpegFrameExtractor, FrameExtractor, DEFAULT_EXTRACT_TIMEOUT,
    FRAME_JPEG_QUALITY,
};
