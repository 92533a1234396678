use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket not found: {key}")]
    NotFound { key: String },

    #[error("invalid bucket key: {0}")]
    InvalidKey(#[from] logylyzer_core::error::CoreError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record writer is no longer running")]
    WorkerGone,

    #[error("record writer queue is full")]
    QueueFull,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StorageError::Io { path, source }
    }
}
