//! Engine configuration

use crate::batch::BatchConfig;
use polyner_core::align::AlignerConfig;
use polyner_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Alignment engine configuration
///
/// Every field has a default, so a JSON file only needs to name what it
/// changes:
///
/// ```json
/// { "active_domains": ["music"], "aligner": { "remove_quotes": true } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Span aligner settings
    pub aligner: AlignerConfig,

    /// Chunking and parallelism
    pub batch: BatchConfig,

    /// Domains whose type rules and mappings apply, in order
    pub active_domains: Vec<String>,

    /// JSON file replacing the built-in domain type mapping
    pub domain_types_path: Option<PathBuf>,

    /// Tokenizer family name resolved through the tokenizer registry
    pub tokenizer_family: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aligner: AlignerConfig::default(),
            batch: BatchConfig::default(),
            active_domains: Vec::new(),
            domain_types_path: None,
            tokenizer_family: "m2m100".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&data)?;
        config.validate()?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Set the aligner config
    pub fn with_aligner(mut self, aligner: AlignerConfig) -> Self {
        self.aligner = aligner;
        self
    }

    /// Set the batch config
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Set the active domains
    pub fn with_active_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Load the domain type mapping from a JSON file
    pub fn with_domain_types_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.domain_types_path = Some(path.into());
        self
    }

    /// Set the tokenizer family
    pub fn with_tokenizer_family(mut self, family: impl Into<String>) -> Self {
        self.tokenizer_family = family.into();
        self
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.batch.max_batch_size == 0 {
            return Err(Error::Configuration("batch.max_batch_size must be positive".to_string()));
        }
        if !self.aligner.remove_quotes && self.aligner.quotation_symbol.trim().is_empty() {
            return Err(Error::Configuration(
                "aligner.quotation_symbol is empty while quotes are enabled".to_string(),
            ));
        }
        if self.tokenizer_family.is_empty() {
            return Err(Error::Configuration("tokenizer_family is empty".to_string()));
        }
        Ok(())
    }
}
