//! Error types for puzzle construction and configuration
//!
//! Illegal moves are never errors: they show up as `false` entries in an
//! action mask. These errors cover malformed input arriving at the boundary
//! (boards, databases, graphs, configuration files).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the puzzle library
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid database line {line}: {reason}")]
    InvalidDatabaseLine { line: usize, reason: String },

    #[error("Puzzle database is empty")]
    EmptyDatabase,

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for puzzle operations
pub type Result<T> = std::result::Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PuzzleError::InvalidDatabaseLine {
            line: 3,
            reason: "expected 81 cells, got 80".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid database line 3: expected 81 cells, got 80"
        );
        assert_eq!(
            PuzzleError::EmptyDatabase.to_string(),
            "Puzzle database is empty"
        );
    }
}
