//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading catalog files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Catalog directory not found.
    #[error("Catalog directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON or does not hold a list of items.
    #[error("Failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required CSV header is absent.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },
}

/// Result type for catalog loading operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
