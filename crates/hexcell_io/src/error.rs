//! Error types for hexcell_io crate.
//!
//! Provides structured error handling for rule files, the rule library
//! and JSON exports.

use thiserror::Error;

/// Main error type for hexcell_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Malformed, truncated or out-of-range rule file
    #[error("Invalid rule file: {0}")]
    InvalidRuleFile(String),

    /// No rule files matched in the library directory
    #[error("No .{extension} rule files in {directory}")]
    EmptyFileSet {
        directory: String,
        extension: String,
    },

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for hexcell_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new invalid rule file error.
    #[must_use]
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRuleFile(msg.into())
    }

    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for a rejected rule file, looking through context wrappers.
    #[must_use]
    pub fn is_invalid_rule_file(&self) -> bool {
        match self {
            Self::InvalidRuleFile(_) => true,
            Self::Context { source, .. } => source.is_invalid_rule_file(),
            _ => false,
        }
    }
}
