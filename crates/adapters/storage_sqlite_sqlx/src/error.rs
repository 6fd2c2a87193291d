//! Storage-specific error type wrapping sqlx errors.

use incidesk_domain::error::IncideskError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connecting, executing, or decoding failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// A result column holds a value with no wire representation.
    #[error("column {column} holds an unsupported {type_name} value")]
    UnsupportedColumn {
        column: String,
        type_name: &'static str,
    },
}

impl From<StorageError> for IncideskError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
