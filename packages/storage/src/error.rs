// ABOUTME: Error types for persisted client state
// ABOUTME: Wraps IO and serialization failures of the key-value backends

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt storage file {0}: {1}")]
    Corrupt(String, String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}
