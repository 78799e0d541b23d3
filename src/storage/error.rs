//! Storage error types

use thiserror::Error;

/// Errors from the key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure while reading or writing a blob
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for writing
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
