//! Common test utilities

#![allow(dead_code)]

use polyner::core::align::AttentionMatrix;
use polyner::core::traits::tokenizer::ConventionTokenizer;

/// SentencePiece tokenizer that isolates `<unk>`
pub fn m2m_tokenizer() -> ConventionTokenizer {
    ConventionTokenizer::sentencepiece().with_isolated_unknown(true)
}

/// Pieces with a leading word marker; `+` glues a piece onto the previous word
///
/// `"play the beat +les"` yields `▁play ▁the ▁beat les`.
pub fn pieces(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|p| match p.strip_prefix('+') {
            Some(rest) => rest.to_string(),
            None => format!("\u{2581}{}", p),
        })
        .collect()
}

/// Attention where every source piece points at one target piece
pub fn pointing(num_targets: usize, targets: &[usize]) -> AttentionMatrix {
    let mut rows = vec![vec![0.0; targets.len()]; num_targets];
    for (source, &target) in targets.iter().enumerate() {
        rows[target][source] = 1.0;
    }
    AttentionMatrix::from_rows(rows).unwrap()
}

/// Attention with explicit rows (one per target piece)
pub fn rows(rows: &[&[f32]]) -> AttentionMatrix {
    AttentionMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}
