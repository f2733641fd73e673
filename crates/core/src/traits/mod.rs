//! Core trait definitions for polyner

pub mod tokenizer;

pub use tokenizer::*;
