//! Banned alias phrases

use crate::error::Result;
use polyner_utils::normalize_text;
use regex::Regex;
use std::collections::HashSet;

/// English stopwords
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Request phrasing, units and music-domain noise that entity linking
/// keeps mistaking for entities
const NOISE_PHRASES: &[&str] = &[
    "music", "musics", "name", "names", "want", "wants", "album", "albums", "please", "who",
    "show me", "tell me", "find me", "sing", "sang", "play", "play me", "plays", "track",
    "tracks", "song", "songs", "record", "records", "recordings", "url", "mount to", "something",
    "get", "selections", "pages", "isbn", "isbn numbers", "average rating", "count", "yesterday",
    "before today", "i need to know", "resume", "resumes", "search for me", "search",
    "searches", "yes", "yeah", "popular", "trouble", "go", "millisecond", "good music",
    "hear music", "h", "m", "s", "d", "y", "am", "pm", "min", "sec", "hour", "year", "month",
    "day", "us", "we", "what", "where", "the", "mon", "tue", "wed", "thu", "fri", "sat", "sun",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "release",
    "released", "dance", "dancing", "need", "i need", "i would", " i will", "find", "the list",
    "get some", "af", "1st", "2nd", "3rd", "tongue", "zero", "one", "two", "three", "four",
    "five", "six", "seven", "eight", "nine", "spotify", "app", "almond", "genre", "play dj",
    "stone", "sound tracks", "hi", "hey", "tweet", "all music", "hello", "preference",
    "top tracks", "all the good", "music i", "id", "jan", "feb", "mar", "apr", "may", "jun",
    "jul", "aug", "sep", "oct", "nov", "dec", "from yesterday", "show tunes", "tag", "ms",
    "all good", "greatest hits", "good hits",
];

/// Ratings, ordinals and relative dates; matched at the start of the alias
const NOISE_PATTERNS: &[&str] = &[
    r"\d (star|rating)",
    r"\dth",
    r"a \d",
    r"\d (hour|min|sec|minute|second|day|month|year)s?",
    r"this (hour|min|sec|minute|second|day|month|year)s?",
];

/// Phrases and patterns never accepted as entity aliases
#[derive(Clone, Debug)]
pub struct BannedPhrases {
    phrases: HashSet<String>,
    patterns: Vec<Regex>,
}

impl BannedPhrases {
    /// Stopwords plus the built-in noise phrases and patterns
    pub fn builtin() -> Result<Self> {
        Self::new(
            STOPWORDS.iter().chain(NOISE_PHRASES).copied(),
            NOISE_PATTERNS.iter().copied(),
        )
    }

    /// Build from custom phrases and patterns
    ///
    /// Patterns are case-insensitive and anchored at the start of the
    /// word, so `\dth` bans "5th street" but not "the 5th".
    pub fn new<'p>(
        phrases: impl IntoIterator<Item = &'p str>,
        patterns: impl IntoIterator<Item = &'p str>,
    ) -> Result<Self> {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(&format!("(?i)^(?:{})", p)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            phrases: phrases.into_iter().map(str::to_string).collect(),
            patterns,
        })
    }

    /// Whether the normalized word is a banned phrase or matches a banned pattern
    pub fn is_banned(&self, word: &str) -> bool {
        let word = normalize_text(word);
        self.phrases.contains(&word) || self.patterns.iter().any(|re| re.is_match(&word))
    }

    /// Number of banned phrases
    pub fn num_phrases(&self) -> usize {
        self.phrases.len()
    }
}
