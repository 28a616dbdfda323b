//! Persisted prompt record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::asset::MediaAsset;

/// Format of the metadata timestamp (ISO-8601, local time, microseconds).
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// JSON document written once per successful prompt pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub metadata: PromptMetadata,
    pub final_prompts: FinalPrompts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub video_path: String,
    pub video_name: String,
    /// Generation time
    pub timestamp: String,
}

/// The three prompts handed to the downstream video tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPrompts {
    pub raw_prompt: String,
    pub anime_prompt: String,
    pub space_prompt: String,
}

impl PromptRecord {
    pub fn new(asset: &MediaAsset, generated_at: NaiveDateTime, prompts: FinalPrompts) -> Self {
        Self {
            metadata: PromptMetadata {
                video_path: asset.path().to_string_lossy().into_owned(),
                video_name: asset.stem().to_string(),
                timestamp: generated_at.format(RECORD_TIMESTAMP_FORMAT).to_string(),
            },
            final_prompts: prompts,
        }
    }
}
