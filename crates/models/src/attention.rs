//! Cross-attention tensors from candle-based translation models

use candle_core::{DType, Result as CandleResult, Tensor};
use polyner_core::align::attention::{AttentionMatrix, AttentionPooling};
use polyner_core::error::{Error, Result};

/// Helper trait for converting candle results into polyner results
pub trait ToPolynerResult<T> {
    /// Map a candle error to an attention error
    fn to_polyner_result(self) -> Result<T>;
}

impl<T> ToPolynerResult<T> for CandleResult<T> {
    fn to_polyner_result(self) -> Result<T> {
        self.map_err(|e| Error::Attention(e.to_string()))
    }
}

/// Pool a `[heads, targets, sources]` tensor into one matrix
pub fn pool_attention(attention: &Tensor, pooling: AttentionPooling) -> Result<AttentionMatrix> {
    let dims = attention.dims();
    if dims.len() != 3 {
        return Err(Error::Attention(format!(
            "Expected [heads, targets, sources] attention, got shape {:?}",
            dims
        )));
    }
    if dims[0] == 0 {
        return Err(Error::Attention("Cannot pool zero attention heads".to_string()));
    }

    let attention = attention.to_dtype(DType::F32).to_polyner_result()?;
    let pooled = match pooling {
        AttentionPooling::Mean => attention.mean(0),
        AttentionPooling::Max => attention.max(0),
    }
    .to_polyner_result()?;

    let rows = pooled.to_vec2::<f32>().to_polyner_result()?;
    AttentionMatrix::from_rows(rows)
}

/// Pool one decoder layer of a `[layers, heads, targets, sources]` tensor
///
/// Negative layer indices count from the last layer, so `-1` selects the
/// final decoder layer.
pub fn pool_layer_attention(
    attention: &Tensor,
    layer: isize,
    pooling: AttentionPooling,
) -> Result<AttentionMatrix> {
    let dims = attention.dims();
    if dims.len() != 4 {
        return Err(Error::Attention(format!(
            "Expected [layers, heads, targets, sources] attention, got shape {:?}",
            dims
        )));
    }

    let num_layers = dims[0] as isize;
    let index = if layer < 0 { num_layers + layer } else { layer };
    if index < 0 || index >= num_layers {
        return Err(Error::Attention(format!(
            "Layer {} out of range for {} decoder layers",
            layer, num_layers
        )));
    }

    log::debug!("Pooling decoder layer {} of {}", index, num_layers);
    let selected = attention.get(index as usize).to_polyner_result()?;
    pool_attention(&selected, pooling)
}
