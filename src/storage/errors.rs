//! Snapshot persistence errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A persisted line that does not match the record contract.
    /// Readers skip and count these rather than surfacing them.
    #[error("malformed line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What failed to parse
        reason: String,
    },

    /// Manifest could not be encoded or decoded
    #[error("manifest error: {0}")]
    Manifest(String),
}

impl StorageError {
    /// Create an I/O error carrying its path
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
