//! Model integrations for polyner
//!
//! Hugging Face tokenizers exposed through the piece-tokenizer capability,
//! plus pooling of candle cross-attention tensors into alignment matrices.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attention;
pub mod registry;
pub mod tokenizer;

// Re-exports
pub use attention::{pool_attention, pool_layer_attention, ToPolynerResult};
pub use registry::{TokenizerFamily, TokenizerRegistry};
pub use tokenizer::HFPieceTokenizer;
