//! Integration tests for span alignment

#[path = "../common/mod.rs"]
mod common;

use common::{m2m_tokenizer, pieces, pointing, rows};
use polyner::core::align::{align_and_replace, AlignerConfig, AttentionMatrix, PieceSpan, SpanAligner};
use polyner::core::traits::tokenizer::ConventionTokenizer;
use polyner::Error;
use proptest::prelude::*;

#[test]
fn test_literal_translation_keeps_both_mentions() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("play the white album by the beat +les");
    let target = pieces("spiele the white al +bum von the beat +les");
    let attention = pointing(target.len(), &[0, 1, 2, 3, 5, 6, 7, 8]);

    let alignment = SpanAligner::new(&tokenizer)
        .align(&source, &target, &attention, &[1, 3, 5, 6])
        .unwrap();

    assert_eq!(alignment.text, "spiele the white album von the beatles");
    assert!(alignment.replacements.is_empty());
    assert_eq!(alignment.literal_matches.len(), 2);
    assert_eq!(
        alignment.used_spans,
        vec![PieceSpan::new(1, 4), PieceSpan::new(6, 8)]
    );
    assert!(!alignment.used_spans[0].overlaps(&alignment.used_spans[1]));
}

#[test]
fn test_attention_translation_substitutes_both_mentions() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("play the white album by the beat +les");
    let target = pieces("spiele das weisse album von den beat +les");
    let attention = pointing(target.len(), &[0, 1, 2, 3, 4, 5, 6, 7]);

    let text = align_and_replace(&source, &target, &tokenizer, &attention, &[1, 3, 5, 6], false).unwrap();
    assert_eq!(text, "spiele \" the white album \" von \" the beatles \"");

    let text = align_and_replace(&source, &target, &tokenizer, &attention, &[1, 3, 5, 6], true).unwrap();
    assert_eq!(text, "spiele the white album von the beatles");
}

#[test]
fn test_repeated_mention_matched_literally_everywhere() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("abba or abba");
    let target = pieces("abba oder abba");
    // attention deliberately points every source piece at "oder"
    let attention = pointing(3, &[1, 1, 1]);

    let alignment = SpanAligner::new(&tokenizer)
        .align(&source, &target, &attention, &[0, 0, 2, 2])
        .unwrap();

    assert_eq!(alignment.text, "abba oder abba");
    assert_eq!(alignment.literal_matches.len(), 2);
    assert!(alignment.literal_matches.iter().all(|m| m.mention == "abba"));
    assert_eq!(
        alignment.used_spans,
        vec![PieceSpan::new(0, 0), PieceSpan::new(2, 2)]
    );
}

#[test]
fn test_count_mismatch_falls_back_to_attention() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("abba or abba");
    let target = pieces("abba oder queen");
    let attention = pointing(3, &[0, 1, 2]);

    let alignment = SpanAligner::new(&tokenizer)
        .align(&source, &target, &attention, &[0, 0, 2, 2])
        .unwrap();

    assert!(alignment.literal_matches.is_empty());
    assert_eq!(alignment.replacements.len(), 2);
    assert_eq!(alignment.text, "\" abba \" oder \" abba \"");
}

#[test]
fn test_conflicting_attention_yields_disjoint_targets() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("play the beatles now");
    let target = pieces("spiele die kaefer jetzt");
    // both mentions peak at target 2; "beatles" has target 1 as runner-up
    let attention = rows(&[
        &[0.9, 0.0, 0.0, 0.0],
        &[0.0, 0.1, 0.3, 0.0],
        &[0.0, 0.8, 0.6, 0.0],
        &[0.1, 0.0, 0.0, 1.0],
    ]);

    let alignment = SpanAligner::new(&tokenizer)
        .align(&source, &target, &attention, &[1, 1, 2, 2])
        .unwrap();

    assert_eq!(
        alignment.used_spans,
        vec![PieceSpan::new(2, 2), PieceSpan::new(1, 1)]
    );
    assert_eq!(alignment.replacements[1].mention, "beatles");
    assert_eq!(alignment.replacements[1].target_words.start, 1);
}

#[test]
fn test_odd_span_list_is_a_format_error() {
    let tokenizer = m2m_tokenizer();
    let source = pieces("play the beat +les");
    let target = pieces("spiele die beat +les");
    let attention = pointing(4, &[0, 1, 2, 3]);

    let err = align_and_replace(&source, &target, &tokenizer, &attention, &[1, 2, 3], false).unwrap_err();
    match err {
        Error::SpanFormat(text) => assert_eq!(text, "play the beatles"),
        other => panic!("expected a span format error, got {:?}", other),
    }
}

#[test]
fn test_custom_quotation_symbol() {
    let tokenizer = ConventionTokenizer::sentencepiece();
    let config = AlignerConfig::new().with_quotation_symbol("'");
    let source = pieces("play queen");
    let target = pieces("spiele koenigin");
    let attention = pointing(2, &[0, 1]);

    let text = SpanAligner::with_config(&tokenizer, config)
        .align_and_replace(&source, &target, &attention, &[1, 1])
        .unwrap();
    assert_eq!(text, "spiele ' queen '");
}

fn words(n: usize, prefix: &str) -> Vec<String> {
    (0..n).map(|i| format!("\u{2581}{}{}", prefix, i)).collect()
}

fn uniform(num_targets: usize, num_sources: usize) -> AttentionMatrix {
    AttentionMatrix::from_rows(vec![vec![0.5; num_sources]; num_targets]).unwrap()
}

fn weighted(num_targets: usize, num_sources: usize, weights: &[u32]) -> AttentionMatrix {
    let rows = (0..num_targets)
        .map(|t| (0..num_sources).map(|s| weights[t * num_sources + s] as f32).collect())
        .collect();
    AttentionMatrix::from_rows(rows).unwrap()
}

proptest! {
    #[test]
    fn prop_even_spans_never_fail(
        num_sources in 1usize..8,
        num_targets in 1usize..8,
        raw in proptest::collection::vec((0usize..8, 0usize..8), 0..4),
    ) {
        let tokenizer = m2m_tokenizer();
        let source = words(num_sources, "s");
        let target = words(num_targets, "t");
        let attention = uniform(num_targets, num_sources);

        let spans: Vec<usize> = raw
            .into_iter()
            .flat_map(|(a, b)| {
                let (a, b) = (a % num_sources, b % num_sources);
                [a.min(b), a.max(b)]
            })
            .collect();

        let result = align_and_replace(&source, &target, &tokenizer, &attention, &spans, true);
        prop_assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn prop_odd_spans_always_fail(
        spans in proptest::collection::vec(0usize..3, 1..7).prop_filter("odd", |s| s.len() % 2 == 1),
    ) {
        let tokenizer = m2m_tokenizer();
        let source = words(3, "s");
        let target = words(3, "t");
        let attention = uniform(3, 3);

        let result = align_and_replace(&source, &target, &tokenizer, &attention, &spans, false);
        prop_assert!(matches!(result, Err(Error::SpanFormat(_))));
    }

    #[test]
    fn prop_disjoint_spans_claim_disjoint_targets(
        num_targets in 1usize..9,
        weights in proptest::collection::vec(0u32..100, 64),
        bounds in proptest::sample::subsequence((0usize..8).collect::<Vec<_>>(), 0..=8),
    ) {
        let tokenizer = m2m_tokenizer();
        let source = words(8, "s");
        let target = words(num_targets, "t");
        let attention = weighted(num_targets, 8, &weights);

        // sorted distinct bounds paired up give non-overlapping source spans
        let spans: Vec<usize> = bounds.chunks_exact(2).flatten().copied().collect();

        let alignment = SpanAligner::new(&tokenizer)
            .align(&source, &target, &attention, &spans)
            .unwrap();
        prop_assert!(alignment.literal_matches.is_empty());
        prop_assert_eq!(alignment.replacements.len(), spans.len() / 2);

        if alignment.replacements.iter().all(|r| !r.overlapping) {
            for (i, a) in alignment.used_spans.iter().enumerate() {
                for b in &alignment.used_spans[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
}
