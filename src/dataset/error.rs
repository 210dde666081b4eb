//! Load error types
//!
//! Errors raised while reading the startup files (sales records and the
//! boundary document). All of them are fatal: the server refuses to start.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading startup data
#[derive(Error, Debug)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be parsed
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Document is not valid JSON
    #[error("Invalid JSON in {path:?}: {message}")]
    Json { path: PathBuf, message: String },

    /// Document is valid JSON but not a usable geometry collection
    #[error("Invalid geometry document: {0}")]
    Geometry(String),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for load operations
pub type LoadResult<T> = Result<T, LoadError>;
