//! polyner
//!
//! Prepares machine-translated NER training data: transfers annotated
//! entity spans from a source utterance onto its translation, and corrects
//! the knowledge-base types of linked entities.

#![warn(missing_docs)]

pub use polyner_core as core;
pub use polyner_models as models;
pub use polyner_pipeline as pipeline;
pub use polyner_utils as utils;

pub use polyner_core::{Error, Result};
