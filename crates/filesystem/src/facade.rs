use crate::errors::{parse_path, FsError};
use crate::router::BackendRouter;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use mountfs_models::{FileMetadata, FsPath, RoutingDecision};
use mountfs_utils::{sanitize, yearmonth_subdir, PathValidator};

/// Single entry point for file operations.
///
/// Every call routes its path(s), validates anything that introduces a new
/// name, and dispatches to exactly one backend. Backend results come back
/// unchanged: no retries, no caching, no fallback to the other backend.
pub struct FilesystemFacade {
    router: BackendRouter,
    validator: PathValidator,
    use_yearmonth_folders: bool,
}

impl FilesystemFacade {
    pub fn new(router: BackendRouter, max_path_length: usize) -> Self {
        Self {
            router,
            validator: PathValidator::new(max_path_length),
            use_yearmonth_folders: true,
        }
    }

    pub fn with_yearmonth_folders(mut self, enabled: bool) -> Self {
        self.use_yearmonth_folders = enabled;
        self
    }

    pub fn router(&self) -> &BackendRouter {
        &self.router
    }

    pub fn route(&self, path: &str) -> Result<(FsPath, RoutingDecision), FsError> {
        self.router.resolve(path)
    }

    /// Filename hook for the host CMS
    pub fn sanitize_filename(&self, name: &str) -> String {
        sanitize(name)
    }

    /// Parses `raw` and sanitizes its last segment
    fn sanitized_target(&self, raw: &str) -> Result<FsPath, FsError> {
        let path = parse_path(raw)?;
        let Some(name) = path.file_name() else {
            return Ok(path);
        };

        let clean = sanitize(name);
        if clean == name {
            return Ok(path);
        }

        tracing::debug!("Sanitized '{}' -> '{}'", name, clean);
        path.with_file_name(&clean).map_err(|e| FsError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn validate(&self, path: &FsPath) -> Result<(), FsError> {
        self.validator
            .validate(path)
            .map_err(|failure| FsError::from_validation(path, failure))
    }

    /// Sanitize, then validate: the checks always see the final candidate
    fn prepare_target(&self, raw: &str) -> Result<FsPath, FsError> {
        let path = self.sanitized_target(raw)?;
        self.validate(&path)?;
        Ok(path)
    }

    pub async fn read(&self, path: &str) -> Result<Bytes, FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        tracing::debug!("read {} via {}", path, decision);
        backend
            .read(&path)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    /// Writes `contents` and returns the path actually written
    pub async fn write(&self, path: &str, contents: Bytes) -> Result<FsPath, FsError> {
        let path = self.prepare_target(path)?;
        let (decision, backend) = self.router.select(&path)?;

        tracing::debug!("write {} ({} bytes) via {}", path, contents.len(), decision);
        backend
            .write(&path, contents)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))?;
        Ok(path)
    }

    pub async fn delete(&self, path: &str, recursive: bool) -> Result<(), FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        tracing::debug!("delete {} (recursive: {}) via {}", path, recursive, decision);
        backend
            .delete(&path, recursive)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    pub async fn list(&self, path: &str, recursive: bool) -> Result<Vec<FsPath>, FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .list(&path, recursive)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    pub async fn stat(&self, path: &str) -> Result<FileMetadata, FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .stat(&path)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    pub async fn exists(&self, path: &str) -> Result<bool, FsError> {
        match self.stat(path).await {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn mkdir(&self, path: &str) -> Result<FsPath, FsError> {
        let path = self.prepare_target(path)?;
        let (decision, backend) = self.router.select(&path)?;

        tracing::debug!("mkdir {} via {}", path, decision);
        backend
            .mkdir(&path)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))?;
        Ok(path)
    }

    /// Renames within one backend; moves across backends are refused up front
    pub async fn rename(&self, from: &str, to: &str) -> Result<FsPath, FsError> {
        let from = parse_path(from)?;
        let to = self.sanitized_target(to)?;

        let from_backend = self.router.route(&from);
        let to_backend = self.router.route(&to);
        if from_backend != to_backend {
            tracing::warn!(
                "Refusing rename {} ({}) -> {} ({})",
                from,
                from_backend,
                to,
                to_backend
            );
            return Err(FsError::CrossBackendRenameUnsupported {
                from: from.to_string(),
                to: to.to_string(),
                from_backend,
                to_backend,
            });
        }

        self.validate(&to)?;

        let backend = self.router.backend(from_backend)?;

        // Same path after normalization: nothing moves, but the source must exist
        if from == to {
            tracing::debug!("rename {} onto itself via {}", from, from_backend);
            backend
                .stat(&from)
                .await
                .map_err(|e| FsError::from_storage(from_backend, &from, e))?;
            return Ok(to);
        }

        tracing::debug!("rename {} -> {} via {}", from, to, from_backend);
        backend
            .rename(&from, &to)
            .await
            .map_err(|e| FsError::from_storage(from_backend, &from, e))?;
        Ok(to)
    }

    pub async fn touch(&self, path: &str) -> Result<FsPath, FsError> {
        let path = self.prepare_target(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .touch(&path)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))?;
        Ok(path)
    }

    pub async fn chmod(&self, path: &str, mode: u32) -> Result<(), FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .chmod(&path, mode)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    pub async fn chown(&self, path: &str, uid: u32) -> Result<(), FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .chown(&path, uid)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    pub async fn chgrp(&self, path: &str, gid: u32) -> Result<(), FsError> {
        let path = parse_path(path)?;
        let (decision, backend) = self.router.select(&path)?;

        backend
            .chgrp(&path, gid)
            .await
            .map_err(|e| FsError::from_storage(decision, &path, e))
    }

    /// Where an upload named `filename` made at `at` will be stored.
    ///
    /// The name is sanitized and filed under `uploads_root/YYYY/MM` (or the
    /// root itself when year/month folders are off), then validated.
    pub fn prepare_upload(&self, filename: &str, at: DateTime<Utc>) -> Result<FsPath, FsError> {
        let name = sanitize(filename);
        let relative = if self.use_yearmonth_folders {
            format!("{}/{}", yearmonth_subdir(at), name)
        } else {
            name
        };

        let root = self.router.uploads_root();
        let path = root.join(&relative).map_err(|e| FsError::InvalidPath {
            path: format!("{}/{}", root, relative),
            reason: e.to_string(),
        })?;

        self.validate(&path)?;
        Ok(path)
    }

    pub async fn upload(&self, filename: &str, contents: Bytes, at: DateTime<Utc>) -> Result<FsPath, FsError> {
        let path = self.prepare_upload(filename, at)?;
        self.write(path.as_str(), contents).await
    }
}
