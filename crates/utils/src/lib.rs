//! Shared utilities for polyner

pub mod text;
pub mod progress;
pub mod io;

pub use text::*;
pub use progress::*;
pub use io::*;
