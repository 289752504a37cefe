//! Error types for the playprint compiler.

use thiserror::Error;

use crate::types::DataKind;

/// Main error type for playprint operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required value is absent (e.g. a vector or matrix slot with no data)
    #[error("Missing data for {kind} value")]
    MissingData { kind: DataKind },

    /// An external reference name is not present in the reference table
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// The output buffer could not accept more bytes
    #[error("Sink write failed: {0}")]
    SinkWrite(String),

    /// A type name was registered twice
    #[error("Duplicate type registration: {0}")]
    DuplicateTypeRegistration(String),

    /// Reference table entries are not strictly ascending by name
    #[error("Reference table not sorted: '{prev}' precedes '{next}'")]
    UnsortedReferenceTable { prev: String, next: String },

    /// Type name has no registered handler
    #[error("Unknown data type: {0}")]
    UnknownType(String),

    /// Value does not match the kind of the slot or handler
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Authored tree is malformed
    #[error("Invalid workprint: {0}")]
    InvalidWorkprint(String),

    /// Playprint buffer ended before a complete field was read
    #[error("Unexpected end of playprint at offset {at} (need {need} bytes)")]
    UnexpectedEof { at: usize, need: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON interchange error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid workprint error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidWorkprint(msg.into())
    }

    /// Create a type mismatch error.
    pub fn mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for playprint operations.
pub type Result<T> = std::result::Result<T, Error>;
