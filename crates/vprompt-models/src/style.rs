//! Target styles for prompt transformation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual theme a raw prompt is rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    Anime,
    Space,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::Anime => "anime",
            PromptStyle::Space => "space",
        }
    }

    /// Descriptor appended to the raw prompt when the transform call fails.
    pub fn fallback_suffix(&self) -> &'static str {
        match self {
            PromptStyle::Anime => ", anime style with soft lighting and magical atmosphere",
            PromptStyle::Space => ", sci-fi style with metallic surfaces and cosmic lighting",
        }
    }

    /// Deterministic styled prompt used when the service cannot be reached.
    pub fn fallback_prompt(&self, raw_prompt: &str) -> String {
        format!("{}{}", raw_prompt, self.fallback_suffix())
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
