use crate::backend::Backend;
use crate::object::{ObjectClient, ObjectInfo};
use crate::StorageError;
use bytes::Bytes;
use mountfs_models::{FileKind, FileMetadata, FsPath};
use std::collections::BTreeSet;
use std::sync::Arc;

const DIRECTORY_CONTENT_TYPE: &str = "application/x-directory";

/// Object-storage backend mounted at `mount_point`.
///
/// A path maps to the key made of its segments below the mount point.
/// Directories only exist as key prefixes (plus the `key/` markers `mkdir`
/// leaves behind).
pub struct RemoteObjectBackend {
    client: Arc<dyn ObjectClient>,
    mount_point: FsPath,
}

impl RemoteObjectBackend {
    pub fn new(client: Arc<dyn ObjectClient>, mount_point: FsPath) -> Self {
        Self {
            client,
            mount_point,
        }
    }

    pub fn mount_point(&self) -> &FsPath {
        &self.mount_point
    }

    fn key_for(&self, path: &FsPath) -> String {
        path.relative_to(&self.mount_point)
            .unwrap_or_else(|| path.segments().collect::<Vec<_>>().join("/"))
    }

    fn dir_prefix(key: &str) -> String {
        if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        }
    }

    fn content_type_for(key: &str) -> String {
        mime_guess::from_path(key).first_or_octet_stream().to_string()
    }

    /// `None` when no object sits at exactly `key`
    async fn head_opt(&self, key: &str) -> Result<Option<ObjectInfo>, StorageError> {
        match self.client.head(key).await {
            Ok(info) => Ok(Some(info)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn move_object(&self, from_key: &str, to_key: &str, content_type: Option<String>) -> Result<(), StorageError> {
        let body = self.client.get(from_key).await?;
        let content_type = content_type.unwrap_or_else(|| {
            if to_key.ends_with('/') {
                DIRECTORY_CONTENT_TYPE.to_string()
            } else {
                Self::content_type_for(to_key)
            }
        });
        self.client.put(to_key, body, &content_type).await?;
        self.client.delete(from_key).await
    }
}

#[async_trait::async_trait]
impl Backend for RemoteObjectBackend {
    async fn read(&self, path: &FsPath) -> Result<Bytes, StorageError> {
        let key = self.key_for(path);
        if key.is_empty() {
            return Err(StorageError::FileNotFound(path.to_string()));
        }
        self.client.get(&key).await
    }

    async fn write(&self, path: &FsPath, contents: Bytes) -> Result<(), StorageError> {
        let key = self.key_for(path);
        if key.is_empty() {
            return Err(StorageError::UploadError(
                path.to_string(),
                "the mount point is a directory".to_string(),
            ));
        }

        let size = contents.len();
        tracing::info!("Uploading {} ({} bytes) to {}", key, size, self.client.describe());

        self.client
            .put(&key, contents, &Self::content_type_for(&key))
            .await?;

        tracing::debug!("Upload complete: {}", key);
        Ok(())
    }

    async fn delete(&self, path: &FsPath, recursive: bool) -> Result<(), StorageError> {
        let key = self.key_for(path);

        if !key.is_empty() && self.head_opt(&key).await?.is_some() {
            tracing::info!("Deleting {} from {}", key, self.client.describe());
            return self.client.delete(&key).await;
        }

        let prefix = Self::dir_prefix(&key);
        let objects = self.client.list(&prefix).await?;
        if objects.is_empty() {
            return Err(StorageError::FileNotFound(path.to_string()));
        }

        let has_children = objects.iter().any(|object| object.key != prefix);
        if has_children && !recursive {
            return Err(StorageError::DirectoryNotEmpty(path.to_string()));
        }

        tracing::info!(
            "Deleting {} object(s) under '{}' from {}",
            objects.len(),
            prefix,
            self.client.describe()
        );
        for object in objects {
            self.client.delete(&object.key).await?;
        }
        Ok(())
    }

    async fn list(&self, path: &FsPath, recursive: bool) -> Result<Vec<FsPath>, StorageError> {
        let key = self.key_for(path);

        if !key.is_empty() && self.head_opt(&key).await?.is_some() {
            return Ok(vec![path.clone()]);
        }

        let prefix = Self::dir_prefix(&key);
        let objects = self.client.list(&prefix).await?;
        if objects.is_empty() && !key.is_empty() {
            return Err(StorageError::FileNotFound(path.to_string()));
        }

        let mut entries = BTreeSet::new();
        for object in &objects {
            let Some(rest) = object.key.strip_prefix(&prefix) else {
                continue;
            };
            let rest = rest.trim_end_matches('/');
            if rest.is_empty() {
                continue;
            }

            if recursive {
                // Implicit directories are listed too, like a disk walk would
                let mut current = String::new();
                for segment in rest.split('/') {
                    if !current.is_empty() {
                        current.push('/');
                    }
                    current.push_str(segment);
                    entries.insert(current.clone());
                }
            } else if let Some(first) = rest.split('/').next() {
                entries.insert(first.to_string());
            }
        }

        entries
            .iter()
            .map(|entry| path.join(entry).map_err(StorageError::from))
            .collect()
    }

    async fn stat(&self, path: &FsPath) -> Result<FileMetadata, StorageError> {
        let key = self.key_for(path);
        if key.is_empty() {
            return Ok(FileMetadata::directory(path.clone()));
        }

        if let Some(info) = self.head_opt(&key).await? {
            return Ok(FileMetadata {
                path: path.clone(),
                kind: FileKind::File,
                size: info.size,
                modified: info.last_modified,
                content_type: info.content_type,
            });
        }

        if !self.client.list(&Self::dir_prefix(&key)).await?.is_empty() {
            return Ok(FileMetadata::directory(path.clone()));
        }

        Err(StorageError::FileNotFound(path.to_string()))
    }

    async fn mkdir(&self, path: &FsPath) -> Result<(), StorageError> {
        let key = self.key_for(path);
        if key.is_empty() {
            return Ok(());
        }

        self.client
            .put(&Self::dir_prefix(&key), Bytes::new(), DIRECTORY_CONTENT_TYPE)
            .await
    }

    async fn rename(&self, from: &FsPath, to: &FsPath) -> Result<(), StorageError> {
        let from_key = self.key_for(from);
        let to_key = self.key_for(to);
        if from_key.is_empty() || to_key.is_empty() {
            return Err(StorageError::Unsupported {
                method: "rename of the mount point".to_string(),
                backend: self.describe(),
            });
        }

        // get+put+delete on one key would delete the object it just wrote
        if from_key == to_key {
            let exists = self.head_opt(&from_key).await?.is_some()
                || !self.client.list(&Self::dir_prefix(&from_key)).await?.is_empty();
            return if exists {
                Ok(())
            } else {
                Err(StorageError::FileNotFound(from.to_string()))
            };
        }

        if let Some(info) = self.head_opt(&from_key).await? {
            tracing::info!("Moving {} -> {} on {}", from_key, to_key, self.client.describe());
            return self.move_object(&from_key, &to_key, info.content_type).await;
        }

        let from_prefix = Self::dir_prefix(&from_key);
        let to_prefix = Self::dir_prefix(&to_key);
        let objects = self.client.list(&from_prefix).await?;
        if objects.is_empty() {
            return Err(StorageError::FileNotFound(from.to_string()));
        }

        tracing::warn!(
            "Renaming '{}' object by object ({} objects); the move is not atomic",
            from_prefix,
            objects.len()
        );
        for object in objects {
            let Some(rest) = object.key.strip_prefix(&from_prefix) else {
                continue;
            };
            let target = format!("{}{}", to_prefix, rest);
            self.move_object(&object.key, &target, object.content_type).await?;
        }
        Ok(())
    }

    async fn touch(&self, path: &FsPath) -> Result<(), StorageError> {
        let key = self.key_for(path);
        if key.is_empty() {
            return Ok(());
        }

        if self.head_opt(&key).await?.is_some() {
            tracing::warn!(
                "The `touch` method is not implemented and/or not supported for existing objects; {} left unchanged",
                key
            );
            return Ok(());
        }

        self.client
            .put(&key, Bytes::new(), &Self::content_type_for(&key))
            .await
    }

    async fn chmod(&self, path: &FsPath, mode: u32) -> Result<(), StorageError> {
        // Object storage has no permission bits; report success like a mount would
        tracing::warn!(
            "The `chmod` method is not implemented and/or not supported; ignoring mode {:o} for {}",
            mode,
            path
        );
        Ok(())
    }

    async fn chown(&self, path: &FsPath, uid: u32) -> Result<(), StorageError> {
        tracing::warn!(
            "The `chown` method is not implemented and/or not supported; ignoring owner {} for {}",
            uid,
            path
        );
        Ok(())
    }

    async fn chgrp(&self, path: &FsPath, gid: u32) -> Result<(), StorageError> {
        tracing::warn!(
            "The `chgrp` method is not implemented and/or not supported; ignoring group {} for {}",
            gid,
            path
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote:{} at {}", self.client.describe(), self.mount_point)
    }

    fn is_remote(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryObjectClient;

    fn p(raw: &str) -> FsPath {
        FsPath::parse(raw).unwrap()
    }

    fn backend() -> (Arc<MemoryObjectClient>, RemoteObjectBackend) {
        let client = Arc::new(MemoryObjectClient::new());
        let backend = RemoteObjectBackend::new(client.clone(), p("wp-content/uploads"));
        (client, backend)
    }

    #[tokio::test]
    async fn test_keys_are_relative_to_mount_point() {
        let (client, backend) = backend();
        backend
            .write(&p("wp-content/uploads/2024/05/a.png"), Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert_eq!(client.keys(), vec!["2024/05/a.png"]);
        let info = client.head("2024/05/a.png").await.unwrap();
        assert_eq!(info.content_type.as_deref(), Some("image/png"));
        assert_eq!(
            backend.read(&p("wp-content/uploads/2024/05/a.png")).await.unwrap(),
            Bytes::from_static(b"png")
        );
    }

    #[tokio::test]
    async fn test_list_collapses_to_children() {
        let (_client, backend) = backend();
        for path in ["2024/05/a.png", "2024/05/b.png", "2024/06/c.png", "top.txt"] {
            backend
                .write(&p(&format!("wp-content/uploads/{}", path)), Bytes::from_static(b"x"))
                .await
                .unwrap();
        }

        let root = p("wp-content/uploads");
        assert_eq!(
            backend.list(&root, false).await.unwrap(),
            vec![p("wp-content/uploads/2024"), p("wp-content/uploads/top.txt")]
        );

        let deep = backend.list(&p("wp-content/uploads/2024"), true).await.unwrap();
        assert_eq!(
            deep,
            vec![
                p("wp-content/uploads/2024/05"),
                p("wp-content/uploads/2024/05/a.png"),
                p("wp-content/uploads/2024/05/b.png"),
                p("wp-content/uploads/2024/06"),
                p("wp-content/uploads/2024/06/c.png"),
            ]
        );

        assert!(backend
            .list(&p("wp-content/uploads/missing"), false)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_stat_files_and_implicit_dirs() {
        let (_client, backend) = backend();
        backend
            .write(&p("wp-content/uploads/2024/a.txt"), Bytes::from_static(b"abc"))
            .await
            .unwrap();

        let file = backend.stat(&p("wp-content/uploads/2024/a.txt")).await.unwrap();
        assert_eq!(file.kind, FileKind::File);
        assert_eq!(file.size, 3);

        assert!(backend.stat(&p("wp-content/uploads/2024")).await.unwrap().is_dir());
        assert!(backend.stat(&p("wp-content/uploads")).await.unwrap().is_dir());
        assert!(backend
            .stat(&p("wp-content/uploads/2025"))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_mkdir_marker_and_delete() {
        let (client, backend) = backend();
        backend.mkdir(&p("wp-content/uploads/empty")).await.unwrap();
        assert!(client.contains("empty/"));
        assert!(backend.stat(&p("wp-content/uploads/empty")).await.unwrap().is_dir());
        assert!(backend.list(&p("wp-content/uploads/empty"), false).await.unwrap().is_empty());

        // An empty directory goes without `recursive`
        backend.delete(&p("wp-content/uploads/empty"), false).await.unwrap();
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_delete_non_empty_directory() {
        let (client, backend) = backend();
        backend
            .write(&p("wp-content/uploads/d/a.txt"), Bytes::from_static(b"a"))
            .await
            .unwrap();

        let err = backend.delete(&p("wp-content/uploads/d"), false).await.unwrap_err();
        assert!(matches!(err, StorageError::DirectoryNotEmpty(_)));

        backend.delete(&p("wp-content/uploads/d"), true).await.unwrap();
        assert!(client.is_empty());
    }

    /// Lists like S3 does: no content type per entry
    struct UntypedListing(Arc<MemoryObjectClient>);

    #[async_trait::async_trait]
    impl ObjectClient for UntypedListing {
        async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
            self.0.get(key).await
        }

        async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
            self.0.put(key, body, content_type).await
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.0.delete(key).await
        }

        async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
            let mut objects = self.0.list(prefix).await?;
            for object in &mut objects {
                object.content_type = None;
            }
            Ok(objects)
        }

        async fn head(&self, key: &str) -> Result<ObjectInfo, StorageError> {
            self.0.head(key).await
        }

        fn describe(&self) -> String {
            "untyped-listing".to_string()
        }
    }

    #[tokio::test]
    async fn test_rename_onto_same_key_keeps_objects() {
        let (client, backend) = backend();
        backend
            .write(&p("wp-content/uploads/a.png"), Bytes::from_static(b"img"))
            .await
            .unwrap();
        backend
            .write(&p("wp-content/uploads/dir/one.txt"), Bytes::from_static(b"1"))
            .await
            .unwrap();

        backend
            .rename(&p("wp-content/uploads/a.png"), &p("wp-content/uploads/a.png"))
            .await
            .unwrap();
        backend
            .rename(&p("wp-content/uploads/dir"), &p("wp-content/uploads/dir"))
            .await
            .unwrap();
        assert_eq!(client.keys(), vec!["a.png", "dir/one.txt"]);
        assert_eq!(
            backend.read(&p("wp-content/uploads/a.png")).await.unwrap(),
            Bytes::from_static(b"img")
        );

        let err = backend
            .rename(&p("wp-content/uploads/nope.png"), &p("wp-content/uploads/nope.png"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_directory_rename_keeps_marker_type() {
        let store = Arc::new(MemoryObjectClient::new());
        let backend = RemoteObjectBackend::new(
            Arc::new(UntypedListing(store.clone())),
            p("wp-content/uploads"),
        );
        backend.mkdir(&p("wp-content/uploads/old/inner")).await.unwrap();
        backend
            .write(&p("wp-content/uploads/old/pic.png"), Bytes::from_static(b"x"))
            .await
            .unwrap();

        backend
            .rename(&p("wp-content/uploads/old"), &p("wp-content/uploads/new"))
            .await
            .unwrap();

        let marker = store.head("new/inner/").await.unwrap();
        assert_eq!(marker.content_type.as_deref(), Some(DIRECTORY_CONTENT_TYPE));
        let pic = store.head("new/pic.png").await.unwrap();
        assert_eq!(pic.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_ownership_changes_are_lenient() {
        let (client, backend) = backend();
        backend.chown(&p("wp-content/uploads/a.png"), 33).await.unwrap();
        backend.chgrp(&p("wp-content/uploads/a.png"), 33).await.unwrap();
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_rename_file_and_directory() {
        let (client, backend) = backend();
        backend
            .write(&p("wp-content/uploads/a/one.txt"), Bytes::from_static(b"1"))
            .await
            .unwrap();
        backend
            .write(&p("wp-content/uploads/a/two.txt"), Bytes::from_static(b"2"))
            .await
            .unwrap();

        backend
            .rename(&p("wp-content/uploads/a/one.txt"), &p("wp-content/uploads/a/uno.txt"))
            .await
            .unwrap();
        assert_eq!(client.keys(), vec!["a/two.txt", "a/uno.txt"]);

        backend
            .rename(&p("wp-content/uploads/a"), &p("wp-content/uploads/b"))
            .await
            .unwrap();
        assert_eq!(client.keys(), vec!["b/two.txt", "b/uno.txt"]);
    }

    #[tokio::test]
    async fn test_touch_and_chmod_are_lenient() {
        let (client, backend) = backend();
        let path = p("wp-content/uploads/t.txt");

        backend.touch(&path).await.unwrap();
        assert!(client.contains("t.txt"));
        backend.touch(&path).await.unwrap();
        backend.chmod(&path, 0o644).await.unwrap();
        assert_eq!(client.len(), 1);
    }
}
