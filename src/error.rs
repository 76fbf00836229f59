use std::path::PathBuf;
use thiserror::Error;

/// Failures at the persistence boundary. The core itself never fails.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no usable state directory on this platform")]
    NoStateDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;
