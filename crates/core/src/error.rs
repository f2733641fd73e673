//! Core error types for polyner

/// Result type alias for polyner
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Odd-length span annotation; carries the detokenized source text
    #[error("Corrupted span in src string: [{0}]")]
    SpanFormat(String),

    #[error("Alignment error: {0}")]
    Alignment(String),

    #[error("Attention error: {0}")]
    Attention(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}
