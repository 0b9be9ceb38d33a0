//! Error types for thaifreq.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ThaifreqError`] enum.
//!
//! Not every variant reaches the caller of
//! [`FrequencyAggregator::analyze`](crate::detector::FrequencyAggregator::analyze).
//! Cache and tracker failures are absorbed (logged, then recomputed), while
//! tagging failures always propagate.
//!
//! # Examples
//!
//! ```
//! use thaifreq::error::{Result, ThaifreqError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ThaifreqError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for thaifreq operations.
#[derive(Error, Debug)]
pub enum ThaifreqError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The linguistic analyzer failed to segment or tag a text.
    #[error("Tagging failure: {0}")]
    Tagging(String),

    /// A durable cache read, write or delete failed.
    #[error("Cache I/O failure: {0}")]
    CacheIo(String),

    /// Input rejected before any processing took place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking collaborator did not answer within its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Worker pool construction or join errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Binary serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ThaifreqError.
pub type Result<T> = std::result::Result<T, ThaifreqError>;

impl ThaifreqError {
    /// Create a new tagging error.
    pub fn tagging<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Tagging(msg.into())
    }

    /// Create a new cache I/O error.
    pub fn cache_io<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::CacheIo(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::InvalidInput(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Config(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Timeout(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::ThreadPool(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        ThaifreqError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error comes from the linguistic analyzer.
    ///
    /// The tagging stage reports analyzer timeouts and panics as
    /// [`ThaifreqError::Tagging`]; a bare `Timeout` belongs to some other
    /// collaborator, such as the durable cache tier.
    pub fn is_tagging_failure(&self) -> bool {
        matches!(self, ThaifreqError::Tagging(_))
    }
}

impl From<bincode::Error> for ThaifreqError {
    fn from(err: bincode::Error) -> Self {
        ThaifreqError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ThaifreqError::tagging("segmenter crashed");
        assert_eq!(error.to_string(), "Tagging failure: segmenter crashed");

        let error = ThaifreqError::cache_io("disk full");
        assert_eq!(error.to_string(), "Cache I/O failure: disk full");

        let error = ThaifreqError::invalid_argument("n must be positive");
        assert_eq!(error.to_string(), "Error: Invalid argument: n must be positive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ThaifreqError::from(io_error);

        match error {
            ThaifreqError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_tagging_classification() {
        assert!(ThaifreqError::tagging("x").is_tagging_failure());
        assert!(!ThaifreqError::timeout("x").is_tagging_failure());
        assert!(!ThaifreqError::cache_io("x").is_tagging_failure());
    }
}
