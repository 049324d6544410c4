use crate::object::{ObjectClient, ObjectInfo};
use crate::StorageError;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// In-process object store for tests and local development
#[derive(Default)]
pub struct MemoryObjectClient {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryObjectClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all stored keys
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// Get number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    fn info(key: &str, object: &StoredObject) -> ObjectInfo {
        ObjectInfo {
            key: key.to_string(),
            size: object.body.len() as u64,
            last_modified: Some(object.last_modified),
            content_type: Some(object.content_type.clone()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectClient for MemoryObjectClient {
    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        self.objects
            .read()
            .get(key)
            .map(|object| object.body.clone())
            .ok_or_else(|| StorageError::FileNotFound(key.to_string()))
    }

    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        let object = StoredObject {
            body,
            content_type: content_type.to_string(),
            last_modified: Utc::now(),
        };
        self.objects.write().insert(key.to_string(), object);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // Same as S3: deleting a missing key is not an error
        self.objects.write().remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let objects = self.objects.read();
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| Self::info(key, object))
            .collect())
    }

    async fn head(&self, key: &str) -> Result<ObjectInfo, StorageError> {
        self.objects
            .read()
            .get(key)
            .map(|object| Self::info(key, object))
            .ok_or_else(|| StorageError::FileNotFound(key.to_string()))
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}
