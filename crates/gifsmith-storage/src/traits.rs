use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal object store contract used by the record pipeline.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Streams the object at `bucket`/`key` into the local file at `dest`,
    /// returning the number of bytes written. A missing object maps to
    /// [`StorageError::NotFound`].
    async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path) -> StorageResult<u64>;

    /// Stores the local file at `path` as the object at `bucket`/`key`.
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<()>;
}
