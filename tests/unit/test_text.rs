//! Integration tests for text normalization and alias filtering

use polyner::core::align::{find_overlap, PieceSpan};
use polyner::core::kb::{has_overlap, select_aliases, AliasCandidate, BannedPhrases};
use polyner::utils::normalize_text;

#[test]
fn test_normalize_text_decomposes_and_collapses() {
    assert_eq!(normalize_text("Café  Noir"), "cafe\u{301} noir");
    assert_eq!(normalize_text("THE\t\tBeatles"), "the beatles");
    // a single tab is not a run
    assert_eq!(normalize_text("a\tb"), "a\tb");
}

#[test]
fn test_is_banned() {
    let banned = BannedPhrases::builtin().unwrap();
    assert!(banned.is_banned("yesterday"));
    assert!(banned.is_banned("3 stars"));
    assert!(banned.is_banned("Yesterday"));
    assert!(banned.is_banned("5th street"));
    assert!(!banned.is_banned("this  week"));
    assert!(banned.is_banned("this years"));
    assert!(!banned.is_banned("jazz"));
    assert!(!banned.is_banned("the 5th"));
}

#[test]
fn test_overlap_conventions_differ_on_touching_spans() {
    // half-open ranges that touch do not overlap
    assert!(!has_overlap(3, 5, &[0..3]));
    assert!(has_overlap(2, 5, &[0..3]));

    // inclusive spans that share an endpoint do
    assert_eq!(find_overlap(3, 5, &[PieceSpan::new(0, 3)]), Some(0));
    assert_eq!(find_overlap(4, 5, &[PieceSpan::new(0, 3)]), None);
}

#[test]
fn test_select_aliases() {
    let banned = BannedPhrases::builtin().unwrap();
    let candidates = vec![
        AliasCandidate::new("the beatles", 5, 16),
        AliasCandidate::new("beatles", 9, 16),
        AliasCandidate::new("play", 0, 4),
        AliasCandidate::new("abbey road", 20, 30),
    ];

    let selected = select_aliases(candidates, &banned);
    let texts: Vec<_> = selected.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["the beatles", "abbey road"]);
}
