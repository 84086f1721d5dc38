//! Error types for the lightbox library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lightbox operations.
#[derive(Debug, Error)]
pub enum LightboxError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog input failed validation (e.g. the reference column is absent).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Empty file or no rows to annotate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Persisted label data could not be parsed. Callers recover by
    /// treating the store as empty.
    #[error("Corrupt label store: {0}")]
    CorruptStore(String),

    /// Attempt to overwrite an existing label without lock override.
    #[error("Label at position {position} is locked; enable lock override to edit it")]
    LockedLabel { position: usize },

    /// Position outside the catalog bounds.
    #[error("Position {position} out of range for catalog of {len} items")]
    PositionOutOfRange { position: usize, len: usize },

    /// Error writing the label store or an export.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for lightbox operations.
pub type Result<T> = std::result::Result<T, LightboxError>;
