//! Tokenizer integration using the tokenizers crate

use crate::registry::TokenizerFamily;
use polyner_core::error::{Error, Result};
use polyner_core::traits::tokenizer::{DetokenizeSide, PieceTokenizer};
use std::path::Path;
use std::sync::Arc;
use tokenizers::{Decoder, Tokenizer as HFTokenizer};

/// Hugging Face tokenizer exposing sub-word pieces
///
/// Translation models with separate source and target vocabularies (for
/// example Marian) load one `tokenizer.json` per side. When no target
/// tokenizer is given, the source one serves both sides.
#[derive(Clone, Debug)]
pub struct HFPieceTokenizer {
    source: Arc<HFTokenizer>,
    target: Option<Arc<HFTokenizer>>,
    family: TokenizerFamily,
}

impl HFPieceTokenizer {
    /// Wrap already loaded tokenizers
    pub fn new(source: HFTokenizer, target: Option<HFTokenizer>, family: TokenizerFamily) -> Self {
        Self {
            source: Arc::new(source),
            target: target.map(Arc::new),
            family,
        }
    }

    /// Load from a local directory or a Hugging Face Hub model id
    pub fn from_pretrained(path: impl AsRef<str>, family: TokenizerFamily) -> Result<Self> {
        let source = load_tokenizer(path.as_ref(), "tokenizer.json")?;
        Ok(Self::new(source, None, family))
    }

    /// Load separate source and target tokenizer files from one location
    pub fn from_pretrained_pair(
        path: impl AsRef<str>,
        source_file: &str,
        target_file: &str,
        family: TokenizerFamily,
    ) -> Result<Self> {
        let path = path.as_ref();
        let source = load_tokenizer(path, source_file)?;
        let target = load_tokenizer(path, target_file)?;
        Ok(Self::new(source, Some(target), family))
    }

    /// Tokenizer family
    pub fn family(&self) -> &TokenizerFamily {
        &self.family
    }

    /// Split text into piece strings without special tokens
    pub fn tokenize(&self, text: &str, side: DetokenizeSide) -> Result<Vec<String>> {
        let encoding = self
            .side(side)
            .encode(text, false)
            .map_err(|e| Error::Tokenization(format!("Encoding failed: {}", e)))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn side(&self, side: DetokenizeSide) -> &HFTokenizer {
        match (side, &self.target) {
            (DetokenizeSide::Target, Some(target)) => target,
            _ => &self.source,
        }
    }
}

fn load_tokenizer(path: &str, file: &str) -> Result<HFTokenizer> {
    let local = Path::new(path);
    let tokenizer_file = if local.exists() {
        local.join(file)
    } else {
        log::info!("Fetching {} for {} from the Hugging Face Hub", file, path);
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| Error::Tokenization(format!("Failed to create HF API: {}", e)))?;
        api.model(path.to_string())
            .get(file)
            .map_err(|e| Error::Tokenization(format!("Failed to get {} from HF Hub: {}", file, e)))?
    };

    HFTokenizer::from_file(&tokenizer_file).map_err(|e| {
        Error::Tokenization(format!(
            "Failed to load tokenizer from {}: {}",
            tokenizer_file.display(),
            e
        ))
    })
}

impl PieceTokenizer for HFPieceTokenizer {
    fn is_piece(&self, token: &str) -> bool {
        self.family.convention.is_piece(token)
    }

    fn convert_tokens_to_string(&self, tokens: &[String], side: DetokenizeSide) -> Result<String> {
        match self.side(side).get_decoder() {
            Some(decoder) => decoder
                .decode(tokens.to_vec())
                .map(|text| text.trim().to_string())
                .map_err(|e| Error::Tokenization(format!("Decoding failed: {}", e))),
            None => {
                log::debug!("No decoder configured for {:?} side, joining by convention", side);
                Ok(self.family.convention.tokens_to_string(tokens))
            }
        }
    }

    fn unk_token(&self) -> &str {
        &self.family.unk_token
    }

    fn mark_word_start(&self, token: &str) -> String {
        self.family.convention.mark_word_start(token)
    }

    fn isolates_unknown(&self) -> bool {
        self.family.isolate_unknown
    }
}
