use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::compression::CompressionError;

/// Unified error for storage, catalog and engine operations.
/// - `From<T>` impls enable `?` across the layers.
/// - Feature extraction and selection never fail, so they have no variant here.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Selector, codec or catalog row named an unregistered algorithm.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Catalog row exists but its backing blob is missing.
    #[error("blob not found: {}", path.display())]
    BlobNotFound { path: PathBuf },

    /// No catalog row matches the lookup key.
    #[error("no catalog entry matches {key:?}")]
    NotFound { key: String },

    /// Underlying storage unreachable, corrupt or rejected the write.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Decompressed bytes do not hash to the recorded content hash.
    #[error("decoded bytes for {file_name} do not match recorded hash: expected {expected}, got {actual}")]
    DecodeMismatch {
        file_name: String,
        expected: String,
        actual: String,
    },

    /// Codec failure (corrupt container, encoder error).
    #[error("compression error: {0}")]
    Compression(CompressionError),

    /// I/O on a caller-supplied input or output path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CatalogError::Io { path: path.into(), source }
    }

    /// True for errors a batch run reports as skipped rather than failed.
    pub fn is_skippable(&self) -> bool {
        match self {
            CatalogError::BlobNotFound { .. } => true,
            CatalogError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<CompressionError> for CatalogError {
    fn from(e: CompressionError) -> Self {
        match e {
            CompressionError::UnknownAlgorithm { name } => CatalogError::UnknownAlgorithm(name),
            other => CatalogError::Compression(other),
        }
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            // a stored algorithm name that no codec answers to
            rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
                match source.downcast::<CompressionError>() {
                    Ok(inner) => CatalogError::from(*inner),
                    Err(other) => CatalogError::Persistence(other.to_string()),
                }
            }
            other => CatalogError::Persistence(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Persistence(e.to_string())
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        // Storage-side I/O; caller paths go through `CatalogError::io`
        CatalogError::Persistence(e.to_string())
    }
}
