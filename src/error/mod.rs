//! Error handling for the maternal registry.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::algorithm::validation::ValidationError;

/// Specialized error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    /// IO error tied to a specific path
    #[error("IO error at {path}: {message}", path = path.display())]
    PathError {
        /// Path the operation was working on
        path: PathBuf,
        /// What went wrong
        message: String,
        /// Underlying IO error, if any
        #[source]
        source: Option<io::Error>,
    },
    /// Error (de)serialising a stored record
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Error building Arrow arrays or record batches
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),
    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    ParquetError(#[from] ParquetError),
    /// A user edit was rejected by the validator
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Several form-level checks failed at once
    #[error("{} validation errors, first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    ValidationErrors(Vec<ValidationError>),
    /// No record exists for the identifier
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    /// A record already exists for the identifier
    #[error("Record already exists: {0}")]
    DuplicateRecord(String),
    /// A stored record is internally inconsistent and cannot be processed
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord {
        /// Identifier (or name) of the offending record
        id: String,
        /// Why it could not be processed
        reason: String,
    },
    /// Error with table shape or cell types handed to a sink
    #[error("Table error: {0}")]
    TableError(String),
    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RegistryError {
    /// Create a malformed record error
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a path-scoped IO error without an underlying source
    pub fn path_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PathError {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a path-scoped IO error wrapping the original error
    pub fn path_error_with_source(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: io::Error,
    ) -> Self {
        Self::PathError {
            path: path.into(),
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
