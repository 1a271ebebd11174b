//! Error types for docintel library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docintel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or querying an analysis result.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The referenced file does not exist.
    #[error("The file {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// A query was issued before any result was loaded.
    #[error("No analysis result loaded")]
    NoResult,

    /// Page number is outside `1..=max`.
    #[error("Invalid page number {page}: must be between 1 and {max}")]
    PageOutOfRange {
        /// Requested page
        page: i64,
        /// Highest page number in the result
        max: u32,
    },

    /// Raw text extraction is not implemented for this model id.
    #[error("Unsupported model id: {0:?}")]
    UnsupportedModel(String),

    /// A field of the result does not have the expected shape.
    #[error("Malformed analysis result: {0}")]
    Malformed(String),

    /// The analysis service failed to produce a result.
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

impl Error {
    /// Wrap a decoding failure for the named result field.
    pub(crate) fn malformed(field: &str, err: impl std::fmt::Display) -> Self {
        Error::Malformed(format!("{}: {}", field, err))
    }
}
