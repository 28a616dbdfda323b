//! Parsed analysis results.

use serde::{Deserialize, Serialize};

/// Result of the single-person frame search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Offset in seconds, `None` when the service reported no usable frame
    pub timestamp: Option<f64>,
    /// Number of people the service reported at that offset
    pub people_count: u32,
    pub reason: String,
}

impl FrameAnalysis {
    /// The timestamp, if and only if it is present and exactly one person
    /// was reported.
    pub fn single_person_timestamp(&self) -> Option<f64> {
        match self.timestamp {
            Some(ts) if self.people_count == 1 && ts.is_finite() => Some(ts),
            _ => None,
        }
    }
}

/// Everything the prompt pipeline derived from a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAnalysis {
    /// Raw descriptions in generation order
    pub raw_candidates: Vec<String>,
    /// One of `raw_candidates`, verbatim
    pub selected_raw: String,
    pub anime: String,
    pub space: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(timestamp: Option<f64>, people_count: u32) -> FrameAnalysis {
        FrameAnalysis {
            timestamp,
            people_count,
            reason: "clear face".to_string(),
        }
    }

    #[test]
    fn test_single_person_timestamp() {
        assert_eq!(analysis(Some(12.5), 1).single_person_timestamp(), Some(12.5));
        assert_eq!(analysis(Some(12.5), 2).single_person_timestamp(), None);
        assert_eq!(analysis(Some(12.5), 0).single_person_timestamp(), None);
        assert_eq!(analysis(None, 1).single_person_timestamp(), None);
    }
}
