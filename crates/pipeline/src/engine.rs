//! Alignment engine

use crate::config::EngineConfig;
use crate::dataset::{AlignedExample, EntityRecord, TranslationExample};
use polyner_core::align::SpanAligner;
use polyner_core::error::Result;
use polyner_core::kb::{KnowledgeTables, TypeReconciler};
use polyner_core::traits::tokenizer::{ConventionTokenizer, PieceTokenizer};
use polyner_models::TokenizerRegistry;
use polyner_utils::{truncate_smart, ProgressReporter};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// An example the engine could not align
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Example ID
    pub id: String,

    /// Rendered error
    pub error: String,
}

/// Outcome of aligning a batch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Aligned examples in input order
    pub aligned: Vec<AlignedExample>,

    /// Examples dropped from the batch, in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of examples processed
    pub fn total(&self) -> usize {
        self.aligned.len() + self.failures.len()
    }

    /// Whether every example aligned
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fraction of examples that aligned
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            return 1.0;
        }
        self.aligned.len() as f64 / self.total() as f64
    }
}

/// Aligns translated examples and reconciles their linked entities
pub struct AlignmentEngine<T: PieceTokenizer> {
    tokenizer: T,
    config: EngineConfig,
    tables: KnowledgeTables,
    reconciler: TypeReconciler,
}

impl<T: PieceTokenizer> AlignmentEngine<T> {
    /// Create an engine, loading the knowledge tables the config names
    ///
    /// Fails with a configuration error when `tokenizer_family` is not a
    /// registered family.
    pub fn new(tokenizer: T, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        TokenizerRegistry::new().resolve(&config.tokenizer_family)?;
        let tables = match &config.domain_types_path {
            Some(path) => KnowledgeTables::with_domain_types_file(path)?,
            None => KnowledgeTables::builtin()?,
        };
        Ok(Self::with_tables(tokenizer, config, tables))
    }

    /// Create an engine with prebuilt tables
    pub fn with_tables(tokenizer: T, config: EngineConfig, tables: KnowledgeTables) -> Self {
        for domain in &config.active_domains {
            if !tables.domain_types.contains(domain) {
                log::warn!("Active domain '{}' has no type mapping", domain);
            }
        }
        Self {
            tokenizer,
            config,
            tables,
            reconciler: TypeReconciler::new(),
        }
    }

    /// Get the config
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the knowledge tables
    pub fn tables(&self) -> &KnowledgeTables {
        &self.tables
    }

    /// Get the tokenizer
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Align one example
    pub fn align_example(&self, example: &TranslationExample) -> Result<AlignedExample> {
        let attention = example.attention.to_matrix(self.config.aligner.pooling)?;
        let aligner = SpanAligner::with_config(&self.tokenizer, self.config.aligner.clone());
        let alignment = aligner.align(
            &example.source_tokens,
            &example.target_tokens,
            &attention,
            &example.source_spans,
        )?;

        log::debug!(
            "Example {}: {} literal, {} replaced",
            example.id,
            alignment.literal_matches.len(),
            alignment.replacements.len()
        );

        Ok(AlignedExample {
            id: example.id.clone(),
            text: alignment.text,
            literal_mentions: alignment
                .literal_matches
                .into_iter()
                .map(|m| m.mention)
                .collect(),
            replaced_mentions: alignment
                .replacements
                .into_iter()
                .map(|r| r.mention)
                .collect(),
            used_spans: alignment.used_spans,
        })
    }

    /// Align a batch; failing examples are logged and reported, not fatal
    pub fn align_batch(&self, examples: &[TranslationExample]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut progress = ProgressReporter::new("align", examples.len());

        for chunk in examples.chunks(self.config.batch.chunk_size()) {
            let results: Vec<Result<AlignedExample>> = if self.config.batch.parallel {
                chunk.par_iter().map(|ex| self.align_example(ex)).collect()
            } else {
                chunk.iter().map(|ex| self.align_example(ex)).collect()
            };

            for (example, result) in chunk.iter().zip(results) {
                match result {
                    Ok(aligned) => report.aligned.push(aligned),
                    Err(e) => {
                        let error = e.to_string();
                        log::warn!(
                            "Dropping example {}: {}",
                            example.id,
                            truncate_smart(&error, 160)
                        );
                        report.failures.push(BatchFailure {
                            id: example.id.clone(),
                            error,
                        });
                    }
                }
            }
            progress.inc(chunk.len());
        }

        progress.finish();
        if !report.is_clean() {
            log::warn!(
                "{} of {} examples failed to align",
                report.failures.len(),
                report.total()
            );
        }
        report
    }

    /// Correct entity types and keep the entities of the active domains
    pub fn reconcile_entities(&self, record: &EntityRecord) -> EntityRecord {
        let entities = self.reconciler.retain_domain_entities(
            &record.entities,
            &self.tables.domain_types,
            &self.config.active_domains,
        );
        EntityRecord::new(record.id.clone(), entities)
    }
}

impl AlignmentEngine<ConventionTokenizer> {
    /// Create an engine over pre-tokenized pieces of the configured family
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let tokenizer = TokenizerRegistry::new()
            .resolve(&config.tokenizer_family)?
            .convention_tokenizer();
        log::debug!("Using tokenizer family '{}'", config.tokenizer_family);
        Self::new(tokenizer, config)
    }
}
