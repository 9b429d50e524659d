//! Error types for Lectern.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LecternError>;

/// The main error type for Lectern operations.
#[derive(Error, Debug)]
pub enum LecternError {
    /// Two documents in the corpus share the same identifier.
    #[error("Duplicate document id: {0}")]
    DuplicateDocumentId(String),

    /// The corpus is empty and the build was configured to reject that.
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// A serialized or in-memory index failed its structural checks.
    #[error("Malformed index: {0}")]
    MalformedIndex(String),

    /// Invalid argument passed to an API.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A corpus source could not be interpreted.
    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error: {0}")]
    Other(String),
}

impl LecternError {
    /// Create a new malformed index error.
    pub fn malformed_index<S: Into<String>>(msg: S) -> Self {
        LecternError::MalformedIndex(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LecternError::InvalidArgument(msg.into())
    }

    /// Create a new invalid configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LecternError::InvalidConfig(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        LecternError::Corpus(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LecternError::Other(msg.into())
    }
}
