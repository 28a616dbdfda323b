//! Extraction of structured fields from free-text service responses.
//!
//! Every function is pure and total: when the expected pattern is missing it
//! returns the documented default instead of failing.

use std::sync::LazyLock;

use regex::Regex;
use vprompt_models::PromptStyle;

/// Literal the frame search answers with when no usable frame exists.
pub const NO_FRAME_SENTINEL: &str = "BEST_TIMESTAMP: NONE";

/// Returned by [`parse_raw_prompt`] for an empty response.
pub const RAW_PROMPT_FAILED: &str = "Failed to generate prompt";

/// Returned by [`parse_frame_reason`] when no `REASON:` label is present.
pub const NO_REASON: &str = "No reason provided";

const RAW_PROMPT_PREFIX: &str = "RAW_PROMPT:";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BEST_TIMESTAMP:\s*([0-9]+\.?[0-9]*)").unwrap());
static PEOPLE_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PEOPLE_COUNT:\s*([0-9]+)").unwrap());
static REASON_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"REASON:\s*(.+)").unwrap());
static REASON_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)REASON:\s*(.+)").unwrap());
static CANDIDATE_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[123]\b").unwrap());

/// Timestamp in seconds after `BEST_TIMESTAMP:`.
///
/// `None` if the text contains [`NO_FRAME_SENTINEL`] anywhere, or if no
/// number follows the label.
pub fn parse_timestamp(text: &str) -> Option<f64> {
    if text.contains(NO_FRAME_SENTINEL) {
        return None;
    }
    TIMESTAMP_RE
        .captures(text)
        .and_then(|c| c[1].parse::<f64>().ok())
}

/// Integer after `PEOPLE_COUNT:`, defaulting to `0`.
pub fn parse_people_count(text: &str) -> u32 {
    PEOPLE_COUNT_RE
        .captures(text)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// Rest of the line after `REASON:`, defaulting to [`NO_REASON`].
pub fn parse_frame_reason(text: &str) -> String {
    REASON_LINE_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| NO_REASON.to_string())
}

/// Everything after `REASON:` including line breaks.
///
/// Falls back to the whole trimmed response, since selection answers are
/// usually free prose; [`NO_REASON`] only for an empty response.
pub fn parse_selection_reason(text: &str) -> String {
    if let Some(c) = REASON_BLOCK_RE.captures(text) {
        return c[1].trim().to_string();
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NO_REASON.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trimmed description with a leading `RAW_PROMPT:` removed.
///
/// Empty responses yield [`RAW_PROMPT_FAILED`].
pub fn parse_raw_prompt(text: &str) -> String {
    let cleaned = text.trim();
    let cleaned = cleaned
        .strip_prefix(RAW_PROMPT_PREFIX)
        .map(str::trim)
        .unwrap_or(cleaned);

    if cleaned.is_empty() {
        RAW_PROMPT_FAILED.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Trimmed styled description with the first matching label removed.
///
/// Recognized labels: `<STYLE>_PROMPT:`, `ANIME_PROMPT:`, `SPACE_PROMPT:`,
/// `<style> version:`, `<style> style:`. Empty responses yield
/// `Failed to generate <style> prompt`.
pub fn parse_styled_prompt(text: &str, style: PromptStyle) -> String {
    let name = style.as_str();
    let prefixes = [
        format!("{}_PROMPT:", name.to_uppercase()),
        "ANIME_PROMPT:".to_string(),
        "SPACE_PROMPT:".to_string(),
        format!("{} version:", name),
        format!("{} style:", name),
    ];

    let mut cleaned = text.trim();
    if let Some(rest) = prefixes.iter().find_map(|p| cleaned.strip_prefix(p.as_str())) {
        cleaned = rest.trim();
    }

    if cleaned.is_empty() {
        format!("Failed to generate {} prompt", name)
    } else {
        cleaned.to_string()
    }
}

/// One-based index of the candidate the service picked.
///
/// Tries the first standalone `1`, `2` or `3`, then the keywords
/// `candidate N` / `first` / `second` / `third` (case-insensitive), and
/// defaults to `1`.
pub fn parse_best_candidate(text: &str) -> usize {
    if let Some(m) = CANDIDATE_DIGIT_RE.find(text) {
        return match m.as_str() {
            "2" => 2,
            "3" => 3,
            _ => 1,
        };
    }

    let lower = text.to_lowercase();
    if lower.contains("candidate 1") || lower.contains("first") {
        1
    } else if lower.contains("candidate 2") || lower.contains("second") {
        2
    } else if lower.contains("candidate 3") || lower.contains("third") {
        3
    } else {
        1
    }
}
