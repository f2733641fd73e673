//! Batch processing

use serde::{Deserialize, Serialize};

/// Batch configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of examples handled per chunk
    pub max_batch_size: usize,

    /// Whether to align the examples of a chunk in parallel
    pub parallel: bool,
}

impl BatchConfig {
    /// Create a new batch config
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            max_batch_size,
            parallel: false,
        }
    }

    /// Enable parallel alignment
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Effective chunk size, never zero
    pub fn chunk_size(&self) -> usize {
        self.max_batch_size.max(1)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(64)
    }
}
