//! Cross-lingual span alignment
//!
//! Transfers annotated entity spans from a source utterance onto the
//! machine-translated target utterance. Mentions the translator copied
//! verbatim are located lexically; the rest are placed with pooled
//! cross-attention and kept disjoint by greedy conflict resolution.

pub mod aligner;
pub mod attention;
pub mod mapping;
pub mod span;
pub mod substring;

pub use aligner::*;
pub use attention::*;
pub use mapping::*;
pub use span::*;
pub use substring::*;

use serde::{Deserialize, Serialize};

/// Span aligner configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Substitute mentions without surrounding quotation marks
    pub remove_quotes: bool,

    /// Quotation symbol wrapped around substituted mentions
    pub quotation_symbol: String,

    /// Reduction applied across attention heads
    pub pooling: AttentionPooling,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            remove_quotes: false,
            quotation_symbol: "\"".to_string(),
            pooling: AttentionPooling::default(),
        }
    }
}

impl AlignerConfig {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable quotation marks around substituted mentions
    pub fn with_remove_quotes(mut self, remove: bool) -> Self {
        self.remove_quotes = remove;
        self
    }

    /// Set the quotation symbol
    pub fn with_quotation_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.quotation_symbol = symbol.into();
        self
    }

    /// Set head pooling
    pub fn with_pooling(mut self, pooling: AttentionPooling) -> Self {
        self.pooling = pooling;
        self
    }

    /// Render a substituted mention
    pub fn render_mention(&self, mention: &str) -> String {
        if self.remove_quotes {
            mention.to_string()
        } else {
            format!("{q} {m} {q}", q = self.quotation_symbol, m = mention)
        }
    }
}
