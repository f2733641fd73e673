//! Word-sequence search and overlap primitives

use crate::align::span::PieceSpan;

/// Count literal occurrences of a word sequence
///
/// Returns the number of occurrences and their starting word indices.
/// Occurrences may overlap each other. An empty pattern never matches.
pub fn count_substring<W, P>(words: &[W], pattern: &[P]) -> (usize, Vec<usize>)
where
    W: AsRef<str>,
    P: AsRef<str>,
{
    if pattern.is_empty() || pattern.len() > words.len() {
        return (0, Vec::new());
    }

    let begins: Vec<usize> = words
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| {
            window
                .iter()
                .zip(pattern)
                .all(|(word, expected)| word.as_ref() == expected.as_ref())
        })
        .map(|(begin, _)| begin)
        .collect();

    (begins.len(), begins)
}

/// Index of the first registered span overlapping `[start, end]`
///
/// Endpoints are inclusive: spans that share a boundary piece overlap.
pub fn find_overlap(start: usize, end: usize, used: &[PieceSpan]) -> Option<usize> {
    used.iter()
        .position(|span| start <= span.end && end >= span.start)
}
