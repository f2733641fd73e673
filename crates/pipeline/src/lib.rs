//! Batch data preparation for polyner
//!
//! Loads machine-translated examples, aligns their entity spans and
//! reconciles the types of their linked entities.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod dataset;
pub mod engine;

pub use batch::*;
pub use config::*;
pub use dataset::*;
pub use engine::*;
