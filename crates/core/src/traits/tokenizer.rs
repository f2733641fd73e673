//! Tokenizer capability used by the span aligner

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// SentencePiece word-start marker
pub const SPIECE_UNDERLINE: char = '\u{2581}';

/// Byte-level BPE word-start marker
pub const BYTE_LEVEL_SPACE: char = '\u{0120}';

/// WordPiece continuation prefix
pub const WORDPIECE_PREFIX: &str = "##";

/// Which side of a translation pair a token sequence belongs to
///
/// Some translation tokenizers keep separate vocabularies or decoding rules
/// for the source and the target language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetokenizeSide {
    Source,
    Target,
}

/// How a tokenizer family marks word boundaries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceConvention {
    /// Word starts carry a leading `▁` (M2M100, Marian, mBART, T5)
    SentencePiece,

    /// Continuations carry a leading `##` (BERT)
    WordPiece,

    /// Word starts carry a leading `Ġ` (GPT-2, RoBERTa, BART)
    ByteLevel,
}

impl PieceConvention {
    /// Whether the token continues the previous word
    pub fn is_piece(&self, token: &str) -> bool {
        match self {
            Self::SentencePiece => !token.starts_with(SPIECE_UNDERLINE),
            Self::WordPiece => token.starts_with(WORDPIECE_PREFIX),
            Self::ByteLevel => !token.starts_with(BYTE_LEVEL_SPACE),
        }
    }

    /// Rewrite a token so that it starts a new word
    pub fn mark_word_start(&self, token: &str) -> String {
        match self {
            Self::SentencePiece => format!("{}{}", SPIECE_UNDERLINE, token),
            Self::ByteLevel => format!("{}{}", BYTE_LEVEL_SPACE, token),
            Self::WordPiece => token.strip_prefix(WORDPIECE_PREFIX).unwrap_or(token).to_string(),
        }
    }

    /// Join tokens back into whitespace-separated text
    pub fn tokens_to_string(&self, tokens: &[String]) -> String {
        match self {
            Self::SentencePiece => tokens
                .concat()
                .replace(SPIECE_UNDERLINE, " ")
                .trim()
                .to_string(),
            Self::ByteLevel => tokens
                .concat()
                .replace(BYTE_LEVEL_SPACE, " ")
                .trim()
                .to_string(),
            Self::WordPiece => tokens
                .join(" ")
                .replace(" ##", "")
                .trim()
                .to_string(),
        }
    }
}

/// Tokenization capability
///
/// This trait defines what the span aligner needs from a tokenizer:
/// the continuation predicate, detokenization, and the unknown-token
/// sentinel. The detokenization convention is an explicit argument.
pub trait PieceTokenizer: Send + Sync {
    /// Whether the token continues the previous word
    fn is_piece(&self, token: &str) -> bool;

    /// Convert tokens back into whitespace-joined text
    fn convert_tokens_to_string(&self, tokens: &[String], side: DetokenizeSide) -> Result<String>;

    /// The out-of-vocabulary sentinel token
    fn unk_token(&self) -> &str;

    /// Rewrite a token so that it starts a new word
    fn mark_word_start(&self, token: &str) -> String;

    /// Whether unknown tokens must be treated as standalone words
    ///
    /// Families whose fixed vocabulary collapses rare words into the
    /// sentinel return true, otherwise the sentinel glues onto the previous
    /// word and corrupts the piece/word mapping.
    fn isolates_unknown(&self) -> bool {
        false
    }

    /// Whether the token is the unknown sentinel
    fn is_unknown(&self, token: &str) -> bool {
        token == self.unk_token()
    }
}

/// Tokenizer over pre-tokenized pieces driven by a [`PieceConvention`]
///
/// Both sides of a pair share the convention, so the detokenization side
/// makes no difference here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConventionTokenizer {
    /// Word-boundary convention
    pub convention: PieceConvention,

    /// Unknown-token sentinel
    pub unk_token: String,

    /// Whether unknown tokens start their own word
    #[serde(default)]
    pub isolate_unknown: bool,
}

impl ConventionTokenizer {
    /// Create a tokenizer for a convention and sentinel
    pub fn new(convention: PieceConvention, unk_token: impl Into<String>) -> Self {
        Self {
            convention,
            unk_token: unk_token.into(),
            isolate_unknown: false,
        }
    }

    /// SentencePiece tokenizer with the `<unk>` sentinel
    pub fn sentencepiece() -> Self {
        Self::new(PieceConvention::SentencePiece, "<unk>")
    }

    /// Treat unknown tokens as standalone words
    pub fn with_isolated_unknown(mut self, isolate: bool) -> Self {
        self.isolate_unknown = isolate;
        self
    }

    /// Split whitespace-separated words into one word-start token each
    pub fn word_tokens(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| match self.convention {
                PieceConvention::WordPiece => word.to_string(),
                _ => self.convention.mark_word_start(word),
            })
            .collect()
    }
}

impl Default for ConventionTokenizer {
    fn default() -> Self {
        Self::sentencepiece()
    }
}

impl PieceTokenizer for ConventionTokenizer {
    fn is_piece(&self, token: &str) -> bool {
        self.convention.is_piece(token)
    }

    fn convert_tokens_to_string(&self, tokens: &[String], _side: DetokenizeSide) -> Result<String> {
        Ok(self.convention.tokens_to_string(tokens))
    }

    fn unk_token(&self) -> &str {
        &self.unk_token
    }

    fn mark_word_start(&self, token: &str) -> String {
        self.convention.mark_word_start(token)
    }

    fn isolates_unknown(&self) -> bool {
        self.isolate_unknown
    }
}
