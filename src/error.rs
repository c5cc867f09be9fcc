//! Error types for rst2html library.

use std::io;
use thiserror::Error;

/// Result type alias for rst2html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or loading documents.
///
/// Rendering a [`Node`](crate::model::Node) tree never fails; errors only
/// come from the boundaries around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON document tree.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document tree that violates the node shape contract.
    #[error("Invalid document tree: {0}")]
    InvalidTree(String),

    /// Markup rejected by the parser in strict mode.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-indexed source line
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Error during output serialization.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a parse error for the given 1-indexed line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Error::InvalidTree(message.into())
    }
}
