//! Text utilities

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn whitespace_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"\s\s+").expect("static whitespace pattern"))
}

/// Normalize text for lexical matching
///
/// Applies Unicode canonical decomposition (NFD), lowercases, and collapses
/// every run of two or more whitespace characters into a single space.
/// Leading and trailing whitespace is not trimmed.
pub fn normalize_text(text: &str) -> String {
    let decomposed: String = text.nfd().collect::<String>().to_lowercase();
    whitespace_runs().replace_all(&decomposed, " ").into_owned()
}

/// Shorten text for log messages, breaking at a word boundary when possible
pub fn truncate_smart(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &cut[..last_space]),
        _ => {
            let keep = max_chars.saturating_sub(3);
            format!("{}...", text.chars().take(keep).collect::<String>())
        }
    }
}
