//! polyner core library
//!
//! Cross-lingual span alignment for machine-translated training data and
//! knowledge-base type reconciliation for noisy entity-linking output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;

pub mod align;
pub mod kb;

pub use align::*;
pub use error::{Error, Result};
pub use kb::*;
pub use traits::*;
