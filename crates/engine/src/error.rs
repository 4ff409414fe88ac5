//! Error types for the engine crate.
//!
//! Extraction itself never fails on malformed text; every soft miss degrades
//! to the next fallback tier. Only a request without usable raw text, and
//! setup problems (config, gazetteer, I/O), surface as errors.

use gazetteer::GazetteerError;
use thiserror::Error;

/// Errors surfaced by the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The request carried no raw text, or raw text that isn't a string
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An engine config file couldn't be decoded or failed validation
    #[error("Invalid config {path}: {reason}")]
    Config { path: String, reason: String },

    /// The gazetteer couldn't be loaded
    #[error("Gazetteer error: {0}")]
    Gazetteer(#[from] GazetteerError),

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
