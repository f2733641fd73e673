//! Pooled cross-attention matrices

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Reduction applied across attention heads
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionPooling {
    /// Element-wise mean across heads
    Mean,

    /// Element-wise max across heads
    #[default]
    Max,
}

impl FromStr for AttentionPooling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            other => Err(Error::Configuration(format!(
                "Unknown attention pooling '{}', expected 'mean' or 'max'",
                other
            ))),
        }
    }
}

/// Cross-attention weights pooled into a single 2-D matrix
///
/// Rows index target pieces (decoder positions) and columns index source
/// pieces (encoder positions), so a source column holds the attention every
/// target piece paid to that source piece.
#[derive(Clone, Debug, PartialEq)]
pub struct AttentionMatrix {
    num_targets: usize,
    num_sources: usize,
    weights: Vec<f32>,
}

impl AttentionMatrix {
    /// Create a matrix from row-major weights
    pub fn new(num_targets: usize, num_sources: usize, weights: Vec<f32>) -> Result<Self> {
        if weights.len() != num_targets * num_sources {
            return Err(Error::Attention(format!(
                "Expected {}x{} = {} weights, got {}",
                num_targets,
                num_sources,
                num_targets * num_sources,
                weights.len()
            )));
        }
        Ok(Self {
            num_targets,
            num_sources,
            weights,
        })
    }

    /// Create a matrix from one row per target piece
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let num_targets = rows.len();
        let num_sources = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != num_sources) {
            return Err(Error::Attention(format!(
                "Ragged attention rows: row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                num_sources
            )));
        }
        Self::new(num_targets, num_sources, rows.into_iter().flatten().collect())
    }

    /// Pool per-head matrices of identical shape into one
    pub fn pool_heads(heads: &[AttentionMatrix], pooling: AttentionPooling) -> Result<Self> {
        let first = heads
            .first()
            .ok_or_else(|| Error::Attention("Cannot pool zero attention heads".to_string()))?;
        if let Some(bad) = heads.iter().position(|h| h.shape() != first.shape()) {
            return Err(Error::Attention(format!(
                "Head {} has shape {:?}, expected {:?}",
                bad,
                heads[bad].shape(),
                first.shape()
            )));
        }

        let mut pooled = first.weights.clone();
        for head in &heads[1..] {
            for (acc, &w) in pooled.iter_mut().zip(&head.weights) {
                match pooling {
                    AttentionPooling::Mean => *acc += w,
                    AttentionPooling::Max => *acc = acc.max(w),
                }
            }
        }
        if pooling == AttentionPooling::Mean {
            let n = heads.len() as f32;
            pooled.iter_mut().for_each(|w| *w /= n);
        }

        Self::new(first.num_targets, first.num_sources, pooled)
    }

    /// `(num_targets, num_sources)`
    pub fn shape(&self) -> (usize, usize) {
        (self.num_targets, self.num_sources)
    }

    /// Number of target pieces (rows)
    pub fn num_targets(&self) -> usize {
        self.num_targets
    }

    /// Number of source pieces (columns)
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Weight at a target/source position
    pub fn get(&self, target: usize, source: usize) -> Option<f32> {
        if target >= self.num_targets || source >= self.num_sources {
            return None;
        }
        self.weights.get(target * self.num_sources + source).copied()
    }

    /// Target index holding the `rank`-th largest weight of a source column
    ///
    /// `rank` is 1-based, so rank 1 is the argmax. Equal weights rank the
    /// lower target index first. Returns `None` when the source column or
    /// the rank is out of range.
    pub fn ranked_target(&self, source: usize, rank: usize) -> Option<usize> {
        if source >= self.num_sources || rank == 0 || rank > self.num_targets {
            return None;
        }

        let column = |target: usize| self.weights[target * self.num_sources + source];
        if rank == 1 {
            return (0..self.num_targets).reduce(|best, t| {
                if column(t) > column(best) {
                    t
                } else {
                    best
                }
            });
        }

        let mut order: Vec<usize> = (0..self.num_targets).collect();
        order.sort_by(|&a, &b| {
            column(b)
                .partial_cmp(&column(a))
                .unwrap_or(Ordering::Equal)
        });
        order.get(rank - 1).copied()
    }

    /// Target index with the highest weight for a source column
    pub fn argmax_target(&self, source: usize) -> Option<usize> {
        self.ranked_target(source, 1)
    }
}
