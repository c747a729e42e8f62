//! Error types for criteria-core.

use thiserror::Error;

/// The main error type for expression parsing, generation and path access.
///
/// Structural scanners never produce errors; a keyword that cannot be
/// located is reported as `None`.
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// Failed to parse an expression or predicate string.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// The attribute path has a shape the accessor cannot handle.
    #[error("Unsupported attribute path '{path}': {reason}")]
    UnsupportedPath { path: String, reason: String },

    #[error("Attribute '{segment}' of path '{path}' does not exist")]
    AttributeNotFound { path: String, segment: String },

    #[error("Unsatisfied parameter: {0}")]
    UnsatisfiedParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CriteriaError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an unsupported path error.
    pub fn unsupported_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for criteria-core operations.
pub type CriteriaResult<T> = Result<T, CriteriaError>;
