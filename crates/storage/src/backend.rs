use crate::StorageError;
use bytes::Bytes;
use mountfs_models::{FileMetadata, FsPath};

/// Storage backend trait shared by the local disk and the object store.
///
/// Backends never see each other; choosing one is the router's job.
/// Concurrent writers to the same path get whatever the backend offers
/// (last-writer-wins on object storage, OS semantics on disk).
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Read a whole file
    async fn read(&self, path: &FsPath) -> Result<Bytes, StorageError>;

    /// Create or replace a file
    async fn write(&self, path: &FsPath, contents: Bytes) -> Result<(), StorageError>;

    /// Delete a file, or a directory when `recursive` allows it
    async fn delete(&self, path: &FsPath, recursive: bool) -> Result<(), StorageError>;

    /// Entries below a directory; a file lists as itself
    async fn list(&self, path: &FsPath, recursive: bool) -> Result<Vec<FsPath>, StorageError>;

    async fn stat(&self, path: &FsPath) -> Result<FileMetadata, StorageError>;

    async fn mkdir(&self, path: &FsPath) -> Result<(), StorageError>;

    /// Move within this backend
    async fn rename(&self, from: &FsPath, to: &FsPath) -> Result<(), StorageError>;

    /// Create an empty file or bump its modification time
    async fn touch(&self, path: &FsPath) -> Result<(), StorageError>;

    async fn chmod(&self, _path: &FsPath, _mode: u32) -> Result<(), StorageError> {
        Err(StorageError::Unsupported {
            method: "chmod".to_string(),
            backend: self.describe(),
        })
    }

    async fn chown(&self, _path: &FsPath, _uid: u32) -> Result<(), StorageError> {
        Err(StorageError::Unsupported {
            method: "chown".to_string(),
            backend: self.describe(),
        })
    }

    async fn chgrp(&self, _path: &FsPath, _gid: u32) -> Result<(), StorageError> {
        Err(StorageError::Unsupported {
            method: "chgrp".to_string(),
            backend: self.describe(),
        })
    }

    /// Human readable identity for logs, e.g. `local:/srv/www`
    fn describe(&self) -> String;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;
}
