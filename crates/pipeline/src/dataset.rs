//! Translated training examples and JSON-lines I/O

use polyner_core::align::{AttentionMatrix, AttentionPooling, PieceSpan};
use polyner_core::error::{Error, Result};
use polyner_core::kb::LinkedEntity;
use polyner_utils::{ensure_parent_dir, non_empty_lines};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Cross-attention as stored in a dataset file
///
/// Either already pooled (`targets x sources`) or one matrix per head
/// (`heads x targets x sources`), pooled on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttentionInput {
    /// Single pooled matrix
    Pooled(Vec<Vec<f32>>),

    /// One matrix per attention head
    Heads(Vec<Vec<Vec<f32>>>),
}

impl AttentionInput {
    /// Build the pooled attention matrix
    pub fn to_matrix(&self, pooling: AttentionPooling) -> Result<AttentionMatrix> {
        match self {
            Self::Pooled(rows) => AttentionMatrix::from_rows(rows.clone()),
            Self::Heads(heads) => {
                let heads = heads
                    .iter()
                    .map(|rows| AttentionMatrix::from_rows(rows.clone()))
                    .collect::<Result<Vec<_>>>()?;
                AttentionMatrix::pool_heads(&heads, pooling)
            }
        }
    }
}

/// One source utterance with its machine translation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslationExample {
    /// Example ID
    pub id: String,

    /// Source-language pieces
    pub source_tokens: Vec<String>,

    /// Target-language pieces
    pub target_tokens: Vec<String>,

    /// Cross-attention between target and source pieces
    pub attention: AttentionInput,

    /// Flat `start, end, ...` list of inclusive source word spans
    #[serde(default)]
    pub source_spans: Vec<usize>,
}

/// Linked entities attached to an example
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Example ID
    pub id: String,

    /// Entities reported by the entity linker
    #[serde(default)]
    pub entities: Vec<LinkedEntity>,
}

impl EntityRecord {
    /// Create a new record
    pub fn new(id: impl Into<String>, entities: Vec<LinkedEntity>) -> Self {
        Self {
            id: id.into(),
            entities,
        }
    }
}

/// Output of aligning one example
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedExample {
    /// Example ID
    pub id: String,

    /// Target text with the source mentions substituted
    pub text: String,

    /// Mentions the translation kept verbatim
    pub literal_mentions: Vec<String>,

    /// Mentions placed through attention
    pub replaced_mentions: Vec<String>,

    /// Target piece ranges claimed during alignment
    pub used_spans: Vec<PieceSpan>,
}

/// Read one JSON value per non-blank line
pub fn load_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let mut items = Vec::new();
    for line in non_empty_lines(path)? {
        let (line_no, line) = line?;
        let item = serde_json::from_str(&line).map_err(|e| {
            Error::Serialization(format!("{}:{}: {}", path.display(), line_no, e))
        })?;
        items.push(item);
    }
    log::debug!("Loaded {} records from {}", items.len(), path.display());
    Ok(items)
}

/// Write one JSON value per line, creating parent directories
pub fn save_jsonl<T: Serialize>(path: impl AsRef<Path>, items: &[T]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    log::debug!("Wrote {} records to {}", items.len(), path.display());
    Ok(())
}
