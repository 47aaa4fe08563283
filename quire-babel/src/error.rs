//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// An extra option was recognized but its value is unusable
    #[error("Invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },
}
