//! Error types for RefAssign

use thiserror::Error;

/// Main error type for loading and validating problem data.
#[derive(Debug, Error)]
pub enum RefAssignError {
    /// The instance is structurally inconsistent (bad references, bounds, counts).
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// A textual input could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RefAssignError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RefAssignError::InvalidInstance(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        RefAssignError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for RefAssign operations
pub type Result<T> = std::result::Result<T, RefAssignError>;
