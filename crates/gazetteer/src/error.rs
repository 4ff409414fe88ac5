//! Error types for the gazetteer crate.

use thiserror::Error;

/// Errors that can occur while loading or validating a gazetteer table
#[derive(Error, Debug)]
pub enum GazetteerError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the alias table couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The table parsed but is not usable (duplicate regions, empty aliases)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GazetteerError>;
