//! Alias candidate selection

use crate::kb::banned::BannedPhrases;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Candidate entity alias over half-open token offsets `[start, end)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasCandidate {
    /// Alias text
    pub text: String,

    /// First token
    pub start: usize,

    /// One past the last token
    pub end: usize,
}

impl AliasCandidate {
    /// Create a new candidate
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Token range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the candidate covers no tokens
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Half-open overlap test against already used ranges
///
/// Adjacent ranges such as `0..3` and `3..5` do not overlap. This differs
/// from the inclusive test the span aligner uses for piece ranges.
pub fn has_overlap(start: usize, end: usize, used: &[Range<usize>]) -> bool {
    used.iter().any(|range| start < range.end && end > range.start)
}

/// Greedily keep the longest non-banned, non-overlapping aliases
///
/// Longer candidates win; ties go to the earlier one. The result is sorted
/// by start offset.
pub fn select_aliases(mut candidates: Vec<AliasCandidate>, banned: &BannedPhrases) -> Vec<AliasCandidate> {
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

    let mut used: Vec<Range<usize>> = Vec::new();
    let mut selected = Vec::new();
    for candidate in candidates {
        if candidate.is_empty() || banned.is_banned(&candidate.text) {
            continue;
        }
        if has_overlap(candidate.start, candidate.end, &used) {
            log::debug!("Dropping overlapping alias '{}'", candidate.text);
            continue;
        }
        used.push(candidate.range());
        selected.push(candidate);
    }

    selected.sort_by_key(|c| c.start);
    selected
}
