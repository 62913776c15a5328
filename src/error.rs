//! Error taxonomy for the analysis pipeline

use serde::Serialize;
use thiserror::Error;

/// Machine-distinguishable failure category.
///
/// Callers dispatch on this, never on the display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, empty or unsupported input
    Parse,
    /// A column required by the analysis is missing
    Schema,
    /// Input exceeds the configured upload limit
    SizeLimit,
    /// Failure at an I/O or remote boundary; the caller may retry
    Transport,
}

/// Errors produced by the analysis pipeline
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Input contains no header row; please re-check the file")]
    EmptyInput,

    #[error("Unsupported file '{file}': expected a .{expected} file")]
    UnsupportedFile { file: String, expected: String },

    #[error("Required column '{0}' is missing from the uploaded file")]
    MissingColumn(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::EmptyInput
            | AnalysisError::UnsupportedFile { .. } => ErrorKind::Parse,
            AnalysisError::MissingColumn(_) => ErrorKind::Schema,
            AnalysisError::TooLarge { .. } => ErrorKind::SizeLimit,
            AnalysisError::Io(_) => ErrorKind::Transport,
        }
    }

    /// Whether a caller may reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AnalysisError::EmptyInput.kind(), ErrorKind::Parse);
        assert_eq!(
            AnalysisError::MissingColumn("Amount".to_string()).kind(),
            ErrorKind::Schema
        );
        assert_eq!(
            AnalysisError::TooLarge { size: 11, limit: 10 }.kind(),
            ErrorKind::SizeLimit
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AnalysisError::from(io);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_retryable());
        assert!(!AnalysisError::EmptyInput.is_retryable());
    }

    #[test]
    fn test_missing_column_message_names_column() {
        let err = AnalysisError::MissingColumn("Amount".to_string());
        assert!(err.to_string().contains("'Amount'"));
    }
}
