//! Error taxonomy for tally.
//!
//! Every fallible operation in the workspace returns [`Error`]. The
//! taxonomy is deliberately small:
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `UnknownOperation` | Registry lookup of an unregistered name |
//! | `Operation` | Any failure while evaluating an operation |
//! | `Validation` | Operand parsing, missing history file, malformed rows, bad config |
//! | `Io` | File system access while saving or loading |
//! | `Storage` | CSV encode/decode failures that are not tied to a row |
//! | `Internal` | Dispatch invariant violations |
//!
//! [`DomainError`](crate::operation::DomainError) is intentionally absent:
//! primitives return it, and the factory folds it into `Operation` before it
//! reaches any caller.

use std::path::PathBuf;

use thiserror::Error;

/// All tally errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Operation name is not in the registry
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The name that was looked up
        name: String,
    },

    /// Operation evaluation failed
    ///
    /// Uniform wrapper: callers only learn that `operation` failed and why.
    #[error("{operation} failed: {message}")]
    Operation {
        /// Operation that was being evaluated
        operation: String,
        /// Message from the underlying failure
        message: String,
    },

    /// Input, storage-location or row validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage codec error
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

/// Validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Operand text is not a number
    #[error("inputs must be numeric (got '{input}')")]
    NotNumeric {
        /// Raw text that failed to parse
        input: String,
    },

    /// Operand is NaN or infinite
    #[error("{name} must be a finite number")]
    NonFinite {
        /// Operand name (`a` or `b`)
        name: &'static str,
    },

    /// Operand magnitude exceeds the configured limit
    #[error("{name} exceeds maximum allowed magnitude {limit}")]
    OutOfRange {
        /// Operand name (`a` or `b`)
        name: &'static str,
        /// Offending value
        value: f64,
        /// Configured limit
        limit: f64,
    },

    /// History file does not exist
    #[error("history file not found: {}", path.display())]
    NotFound {
        /// Location that was read
        path: PathBuf,
    },

    /// A persisted row could not be parsed
    #[error("malformed history row {row}: {reason}")]
    MalformedRow {
        /// 1-based data row number (header excluded)
        row: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A required column is absent from the persisted table
    #[error("history file is missing column '{column}'")]
    MissingColumn {
        /// Column name
        column: &'static str,
    },

    /// Encoding label is not recognised
    #[error("unsupported encoding: {label}")]
    UnsupportedEncoding {
        /// Label as configured
        label: String,
    },

    /// File content is not valid in the configured encoding
    #[error("history file is not valid {label}")]
    Encoding {
        /// Encoding name
        label: String,
    },

    /// Configuration value rejected
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Configuration key
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for tally operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build the uniform operation-failure error.
    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Check if this is an operation-evaluation failure.
    pub fn is_operation(&self) -> bool {
        matches!(self, Error::Operation { .. })
    }

    /// Check if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is the "history file not found" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Validation(ValidationError::NotFound { .. }))
    }
}
