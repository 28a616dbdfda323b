//! Shared data models for the vprompt pipelines.
//!
//! This crate provides Serde-serializable types for:
//! - Local media assets and their remote handles
//! - Parsed analysis results for both pipelines
//! - Prompt styles and the persisted prompt record

pub mod analysis;
pub mod asset;
pub mod record;
pub mod remote;
pub mod style;

// Re-export common types
pub use analysis::{FrameAnalysis, PromptAnalysis};
pub use asset::MediaAsset;
pub use record::{FinalPrompts, PromptMetadata, PromptRecord};
pub use remote::{RemoteFile, RemoteFileState};
pub use style::PromptStyle;
