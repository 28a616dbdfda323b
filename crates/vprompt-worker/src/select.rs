//! Candidate selection.
//!
//! Two fallback layers exist and are kept apart: [`select_candidate`]
//! guards against an index that does not name a candidate, and
//! [`first_candidate`] is what the prompt pipeline uses when the selection
//! call itself failed.

/// Candidate at the one-based `index`, verbatim.
///
/// Zero or out-of-range indices resolve to the first candidate. `None` only
/// when there are no candidates at all.
pub fn select_candidate(candidates: &[String], index: usize) -> Option<&str> {
    index
        .checked_sub(1)
        .and_then(|i| candidates.get(i))
        .or_else(|| candidates.first())
        .map(String::as_str)
}

/// Unconditional fallback when no selection could be obtained.
pub fn first_candidate(candidates: &[String]) -> Option<&str> {
    candidates.first().map(String::as_str)
}
