//! Tokenizer family registry

use polyner_core::error::{Error, Result};
use polyner_core::traits::tokenizer::{ConventionTokenizer, PieceConvention};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Word-boundary behaviour of a translation tokenizer family
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenizerFamily {
    /// Family name used in configuration
    pub name: String,

    /// Word-boundary convention of its pieces
    pub convention: PieceConvention,

    /// Unknown-token sentinel
    pub unk_token: String,

    /// Whether the fixed vocabulary collapses rare words into the sentinel
    pub isolate_unknown: bool,
}

impl TokenizerFamily {
    /// Create a new family description
    pub fn new(
        name: impl Into<String>,
        convention: PieceConvention,
        unk_token: impl Into<String>,
        isolate_unknown: bool,
    ) -> Self {
        Self {
            name: name.into(),
            convention,
            unk_token: unk_token.into(),
            isolate_unknown,
        }
    }

    /// Tokenizer over pre-tokenized pieces of this family
    pub fn convention_tokenizer(&self) -> ConventionTokenizer {
        ConventionTokenizer::new(self.convention, self.unk_token.clone())
            .with_isolated_unknown(self.isolate_unknown)
    }
}

/// Registry of tokenizer families selectable by name
pub struct TokenizerRegistry {
    families: HashMap<String, TokenizerFamily>,
}

impl TokenizerRegistry {
    /// Create a registry holding the built-in families
    pub fn new() -> Self {
        let mut registry = Self {
            families: HashMap::new(),
        };
        registry.register_built_in_families();
        registry
    }

    fn register_built_in_families(&mut self) {
        use PieceConvention::*;

        // M2M100 encodes words missing from its fixed vocabulary as <unk>
        self.register(TokenizerFamily::new("m2m100", SentencePiece, "<unk>", true));
        self.register(TokenizerFamily::new("marian", SentencePiece, "<unk>", false));
        self.register(TokenizerFamily::new("mbart", SentencePiece, "<unk>", false));
        self.register(TokenizerFamily::new("t5", SentencePiece, "<unk>", false));
        self.register(TokenizerFamily::new("bert", WordPiece, "[UNK]", false));
        self.register(TokenizerFamily::new("gpt2", ByteLevel, "<|endoftext|>", false));
        self.register(TokenizerFamily::new("bart", ByteLevel, "<unk>", false));
    }

    /// Get a family by name
    pub fn get(&self, name: &str) -> Option<&TokenizerFamily> {
        self.families.get(name)
    }

    /// Get a family by name or fail with a configuration error
    pub fn resolve(&self, name: &str) -> Result<&TokenizerFamily> {
        self.get(name).ok_or_else(|| {
            let mut known: Vec<&str> = self.families.keys().map(String::as_str).collect();
            known.sort_unstable();
            Error::Configuration(format!(
                "Unknown tokenizer family '{}', expected one of: {}",
                name,
                known.join(", ")
            ))
        })
    }

    /// Guess the family from a model identifier such as `facebook/m2m100_418M`
    pub fn detect(&self, model_id: &str) -> Option<&TokenizerFamily> {
        let lowered = model_id.to_lowercase();
        let mut names: Vec<&String> = self.families.keys().collect();
        // longest first so "mbart" wins over "bart"
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        names
            .into_iter()
            .find(|name| lowered.contains(name.as_str()))
            .and_then(|name| self.families.get(name))
    }

    /// List all registered families
    pub fn list(&self) -> Vec<&TokenizerFamily> {
        self.families.values().collect()
    }

    /// Register a custom family
    pub fn register(&mut self, family: TokenizerFamily) {
        self.families.insert(family.name.clone(), family);
    }
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
