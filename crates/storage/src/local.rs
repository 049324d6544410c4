use crate::backend::Backend;
use crate::StorageError;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use mountfs_models::{FileKind, FileMetadata, FsPath};
use mountfs_utils::normalize_path;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Local filesystem storage backend.
///
/// Every path, relative or absolute, resolves beneath `root`.
pub struct LocalBackend {
    root: PathBuf,
    file_mode: u32,
    dir_mode: u32,
}

impl LocalBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }

    pub fn with_modes(mut self, file_mode: u32, dir_mode: u32) -> Self {
        self.file_mode = file_mode;
        self.dir_mode = dir_mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &FsPath) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.segments() {
            full.push(segment);
        }
        full
    }

    async fn ensure_parent(&self, full: &Path) -> Result<(), StorageError> {
        if let Some(parent) = full.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
                tracing::debug!("    Created: {}", parent.display());
            }
        }
        Ok(())
    }
}

impl LocalBackend {
    #[cfg(unix)]
    async fn set_owner(
        &self,
        path: &FsPath,
        _method: &str,
        uid: Option<u32>,
        gid: Option<u32>,
    ) -> Result<(), StorageError> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(StorageError::FileNotFound(path.to_string()));
        }

        tokio::task::spawn_blocking(move || std::os::unix::fs::chown(&full, uid, gid)).await??;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn set_owner(
        &self,
        _path: &FsPath,
        method: &str,
        _uid: Option<u32>,
        _gid: Option<u32>,
    ) -> Result<(), StorageError> {
        Err(StorageError::Unsupported {
            method: method.to_string(),
            backend: self.describe(),
        })
    }
}

#[async_trait::async_trait]
impl Backend for LocalBackend {
    async fn read(&self, path: &FsPath) -> Result<Bytes, StorageError> {
        let full = self.resolve(path);
        let data = fs::read(&full)
            .await
            .map_err(|e| StorageError::from_io(path.as_str(), e))?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &FsPath, contents: Bytes) -> Result<(), StorageError> {
        let full = self.resolve(path);
        self.ensure_parent(&full).await?;

        fs::write(&full, &contents).await?;
        apply_mode(&full, self.file_mode).await?;

        tracing::debug!("Wrote {} bytes to {}", contents.len(), full.display());
        Ok(())
    }

    async fn delete(&self, path: &FsPath, recursive: bool) -> Result<(), StorageError> {
        let full = self.resolve(path);
        let metadata = fs::symlink_metadata(&full)
            .await
            .map_err(|e| StorageError::from_io(path.as_str(), e))?;

        if !metadata.is_dir() {
            fs::remove_file(&full).await?;
        } else if recursive {
            fs::remove_dir_all(&full).await?;
        } else {
            let mut entries = fs::read_dir(&full).await?;
            if entries.next_entry().await?.is_some() {
                return Err(StorageError::DirectoryNotEmpty(path.to_string()));
            }
            fs::remove_dir(&full).await?;
        }

        tracing::debug!("Deleted {}", full.display());
        Ok(())
    }

    async fn list(&self, path: &FsPath, recursive: bool) -> Result<Vec<FsPath>, StorageError> {
        let full = self.resolve(path);
        let metadata = fs::metadata(&full)
            .await
            .map_err(|e| StorageError::from_io(path.as_str(), e))?;

        if !metadata.is_dir() {
            return Ok(vec![path.clone()]);
        }

        let relative: Vec<String> = if recursive {
            let base = full.clone();
            tokio::task::spawn_blocking(move || -> Result<Vec<String>, std::io::Error> {
                let mut found = Vec::new();
                for entry in walkdir::WalkDir::new(&base).min_depth(1) {
                    let entry = entry?;
                    if let Ok(rel) = entry.path().strip_prefix(&base) {
                        found.push(normalize_path(rel));
                    }
                }
                Ok(found)
            })
            .await??
        } else {
            let mut found = Vec::new();
            let mut entries = fs::read_dir(&full).await?;
            while let Some(entry) = entries.next_entry().await? {
                found.push(entry.file_name().to_string_lossy().to_string());
            }
            found
        };

        let mut listed = relative
            .iter()
            .map(|rel| path.join(rel))
            .collect::<Result<Vec<_>, _>>()?;
        listed.sort();
        Ok(listed)
    }

    async fn stat(&self, path: &FsPath) -> Result<FileMetadata, StorageError> {
        let full = self.resolve(path);
        let metadata = fs::metadata(&full)
            .await
            .map_err(|e| StorageError::from_io(path.as_str(), e))?;

        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        if metadata.is_dir() {
            return Ok(FileMetadata {
                modified,
                ..FileMetadata::directory(path.clone())
            });
        }

        let content_type = mime_guess::from_path(&full)
            .first_or_octet_stream()
            .to_string();

        Ok(FileMetadata {
            path: path.clone(),
            kind: FileKind::File,
            size: metadata.len(),
            modified,
            content_type: Some(content_type),
        })
    }

    async fn mkdir(&self, path: &FsPath) -> Result<(), StorageError> {
        let full = self.resolve(path);
        if !full.exists() {
            fs::create_dir_all(&full).await?;
            apply_mode(&full, self.dir_mode).await?;
            tracing::debug!("    Created: {}", full.display());
        } else {
            tracing::debug!("    Exists:  {}", full.display());
        }
        Ok(())
    }

    async fn rename(&self, from: &FsPath, to: &FsPath) -> Result<(), StorageError> {
        let source = self.resolve(from);
        let target = self.resolve(to);

        if !source.exists() {
            return Err(StorageError::FileNotFound(from.to_string()));
        }
        self.ensure_parent(&target).await?;

        fs::rename(&source, &target).await?;
        tracing::debug!("Renamed {} -> {}", source.display(), target.display());
        Ok(())
    }

    async fn touch(&self, path: &FsPath) -> Result<(), StorageError> {
        let full = self.resolve(path);
        self.ensure_parent(&full).await?;

        let file_mode = self.file_mode;
        tokio::task::spawn_blocking(move || -> Result<(), std::io::Error> {
            let existed = full.exists();
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&full)?;
            file.set_modified(std::time::SystemTime::now())?;
            if !existed {
                apply_mode_sync(&full, file_mode)?;
            }
            Ok(())
        })
        .await??;

        Ok(())
    }

    async fn chmod(&self, path: &FsPath, mode: u32) -> Result<(), StorageError> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(StorageError::FileNotFound(path.to_string()));
        }

        #[cfg(unix)]
        {
            apply_mode(&full, mode).await?;
            Ok(())
        }

        #[cfg(not(unix))]
        {
            let _ = mode;
            Err(StorageError::Unsupported {
                method: "chmod".to_string(),
                backend: self.describe(),
            })
        }
    }

    async fn chown(&self, path: &FsPath, uid: u32) -> Result<(), StorageError> {
        self.set_owner(path, "chown", Some(uid), None).await
    }

    async fn chgrp(&self, path: &FsPath, gid: u32) -> Result<(), StorageError> {
        self.set_owner(path, "chgrp", None, Some(gid)).await
    }

    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    fn is_remote(&self) -> bool {
        false
    }
}

#[cfg(unix)]
async fn apply_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await
}

#[cfg(not(unix))]
async fn apply_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn apply_mode_sync(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode_sync(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(raw: &str) -> FsPath {
        FsPath::parse(raw).unwrap()
    }

    fn backend() -> (tempfile::TempDir, LocalBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().to_path_buf());
        (dir, backend)
    }

    #[tokio::test]
    async fn test_write_read_creates_parents() {
        let (dir, backend) = backend();
        let path = p("wp-content/uploads/2024/05/a.txt");

        backend.write(&path, Bytes::from_static(b"hello")).await.unwrap();

        assert!(dir.path().join("wp-content/uploads/2024/05/a.txt").exists());
        assert_eq!(backend.read(&path).await.unwrap(), Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn test_absolute_paths_resolve_under_root() {
        let (dir, backend) = backend();
        backend.write(&p("/etc/site.txt"), Bytes::from_static(b"x")).await.unwrap();
        assert!(dir.path().join("etc/site.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, backend) = backend();
        let err = backend.read(&p("nope.txt")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(backend.stat(&p("nope.txt")).await.unwrap_err().is_not_found());
        assert!(backend.delete(&p("nope.txt"), false).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_flat_and_recursive() {
        let (_dir, backend) = backend();
        backend.write(&p("up/a.txt"), Bytes::from_static(b"a")).await.unwrap();
        backend.write(&p("up/2024/b.txt"), Bytes::from_static(b"b")).await.unwrap();

        let flat = backend.list(&p("up"), false).await.unwrap();
        assert_eq!(flat, vec![p("up/2024"), p("up/a.txt")]);

        let deep = backend.list(&p("up"), true).await.unwrap();
        assert_eq!(deep, vec![p("up/2024"), p("up/2024/b.txt"), p("up/a.txt")]);

        let single = backend.list(&p("up/a.txt"), false).await.unwrap();
        assert_eq!(single, vec![p("up/a.txt")]);
    }

    #[tokio::test]
    async fn test_stat_reports_kind_and_type() {
        let (_dir, backend) = backend();
        backend.write(&p("up/a.png"), Bytes::from_static(b"1234")).await.unwrap();

        let file = backend.stat(&p("up/a.png")).await.unwrap();
        assert_eq!(file.kind, FileKind::File);
        assert_eq!(file.size, 4);
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert!(file.modified.is_some());

        let dir = backend.stat(&p("up")).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_delete_directory_requires_recursive() {
        let (dir, backend) = backend();
        backend.write(&p("up/a.txt"), Bytes::from_static(b"a")).await.unwrap();

        let err = backend.delete(&p("up"), false).await.unwrap_err();
        assert!(matches!(err, StorageError::DirectoryNotEmpty(_)));

        backend.delete(&p("up"), true).await.unwrap();
        assert!(!dir.path().join("up").exists());
    }

    #[tokio::test]
    async fn test_mkdir_rename_touch() {
        let (dir, backend) = backend();
        backend.mkdir(&p("a/b")).await.unwrap();
        assert!(dir.path().join("a/b").is_dir());

        backend.touch(&p("a/b/new.txt")).await.unwrap();
        assert_eq!(backend.read(&p("a/b/new.txt")).await.unwrap().len(), 0);

        backend.rename(&p("a/b/new.txt"), &p("c/moved.txt")).await.unwrap();
        assert!(dir.path().join("c/moved.txt").exists());
        assert!(!dir.path().join("a/b/new.txt").exists());

        let err = backend.rename(&p("a/b/new.txt"), &p("c/x.txt")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_modes_applied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().to_path_buf()).with_modes(0o600, 0o700);
        backend.write(&p("a.txt"), Bytes::from_static(b"a")).await.unwrap();

        let mode = std::fs::metadata(dir.path().join("a.txt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        backend.chmod(&p("a.txt"), 0o640).await.unwrap();
        let mode = std::fs::metadata(dir.path().join("a.txt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_chown_chgrp_to_current_owner() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().to_path_buf());
        backend.write(&p("a.txt"), Bytes::from_static(b"a")).await.unwrap();

        let meta = std::fs::metadata(dir.path().join("a.txt")).unwrap();
        backend.chown(&p("a.txt"), meta.uid()).await.unwrap();
        backend.chgrp(&p("a.txt"), meta.gid()).await.unwrap();

        let after = std::fs::metadata(dir.path().join("a.txt")).unwrap();
        assert_eq!((after.uid(), after.gid()), (meta.uid(), meta.gid()));

        let err = backend.chown(&p("missing.txt"), meta.uid()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
