//! Error types for envstore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using EnvError
pub type Result<T> = std::result::Result<T, EnvError>;

/// Unified error type for envstore operations
#[derive(Debug, Error)]
pub enum EnvError {
    // -------------------------------------------------------------------------
    // Filter Errors
    // -------------------------------------------------------------------------
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("patterns matched no keys: {}", .0.join(", "))]
    MissingPatterns(Vec<String>),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("failed to read env file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EnvError {
    /// The pattern that failed to compile, if this is an `InvalidPattern`.
    ///
    /// A failed keep/drop reports this pattern as its only missing one.
    pub fn invalid_pattern(&self) -> Option<&str> {
        match self {
            EnvError::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }

    /// Patterns to report as missing for this failure.
    pub fn missing(&self) -> Vec<String> {
        match self {
            EnvError::InvalidPattern { pattern, .. } => vec![pattern.clone()],
            EnvError::MissingPatterns(patterns) => patterns.clone(),
            _ => Vec::new(),
        }
    }
}
