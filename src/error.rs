//! Error types for the Synrank library.
//!
//! All errors are represented by the [`SynrankError`] enum. Loading a
//! malformed thesaurus, reading a missing file, or hydrating a ranked id that
//! the document store does not know about all surface here.
//!
//! # Examples
//!
//! ```
//! use synrank::error::{Result, SynrankError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SynrankError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Synrank operations.
#[derive(Error, Debug)]
pub enum SynrankError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Thesaurus loading errors
    #[error("Thesaurus error: {0}")]
    Thesaurus(String),

    /// Index-related errors (postings loading, lookups)
    #[error("Index error: {0}")]
    Index(String),

    /// Document store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid argument or configuration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

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

/// Result type alias for operations that may fail with SynrankError.
pub type Result<T> = std::result::Result<T, SynrankError>;

impl SynrankError {
    /// Create a new thesaurus error.
    pub fn thesaurus<S: Into<String>>(msg: S) -> Self {
        SynrankError::Thesaurus(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SynrankError::Index(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SynrankError::Storage(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SynrankError::Analysis(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SynrankError::NotFound(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SynrankError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SynrankError::InvalidArgument(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SynrankError::Other(msg.into())
    }
}
