//! Inclusive index spans

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` index range over words or pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First index
    pub start: usize,

    /// Last index (inclusive)
    pub end: usize,
}

/// Span over whitespace-separated words
pub type WordSpan = Span;

/// Span over sub-word tokens
pub type PieceSpan = Span;

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices covered, zero for inverted spans
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Check if the span is inverted
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive overlap, touching endpoints count
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Copy with start and end swapped when inverted
    pub fn ordered(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Pair a flat `start, end, start, end, ...` annotation into spans
///
/// Returns `None` when the annotation has odd length.
pub fn pair_spans(flat: &[usize]) -> Option<Vec<Span>> {
    if flat.len() % 2 != 0 {
        return None;
    }
    Some(flat.chunks_exact(2).map(|pair| Span::new(pair[0], pair[1])).collect())
}
