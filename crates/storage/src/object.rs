use crate::StorageError;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// What a listing or `head` call reports about one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
}

/// Minimal object-store capability the remote backend is written against.
///
/// Missing keys surface as [`StorageError::FileNotFound`] from `get` and `head`.
#[async_trait::async_trait]
pub trait ObjectClient: Send + Sync {
    async fn get(&self, key: &str) -> Result<Bytes, StorageError>;

    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Every object whose key starts with `prefix`, in key order
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError>;

    async fn head(&self, key: &str) -> Result<ObjectInfo, StorageError>;

    fn describe(&self) -> String;
}
