use crate::errors::{parse_path, FsError};
use mountfs_models::{FsPath, RoutingDecision};
use mountfs_storage::{Backend, StorageError};
use std::sync::Arc;

/// Decides per path whether the remote object store or the local disk serves it.
///
/// Paths under the uploads root (the root included) are managed and go
/// remote; everything else goes local. Both sides are compared in normalized
/// form, segment by segment, so `uploads/../wp-config.php` cannot sneak past.
pub struct BackendRouter {
    uploads_root: FsPath,
    remote_enabled: bool,
    local: Arc<dyn Backend>,
    remote: Option<Arc<dyn Backend>>,
}

impl BackendRouter {
    pub fn new(
        uploads_root: FsPath,
        remote_enabled: bool,
        local: Arc<dyn Backend>,
        remote: Option<Arc<dyn Backend>>,
    ) -> Self {
        Self {
            uploads_root,
            remote_enabled,
            local,
            remote,
        }
    }

    pub fn uploads_root(&self) -> &FsPath {
        &self.uploads_root
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote_enabled
    }

    /// Pure routing decision; no I/O
    pub fn route(&self, path: &FsPath) -> RoutingDecision {
        if self.remote_enabled && path.starts_with(&self.uploads_root) {
            RoutingDecision::Remote
        } else {
            RoutingDecision::Local
        }
    }

    /// Parses raw input and routes it; malformed input fails instead of defaulting to local
    pub fn resolve(&self, raw: &str) -> Result<(FsPath, RoutingDecision), FsError> {
        let path = parse_path(raw)?;
        let decision = self.route(&path);
        Ok((path, decision))
    }

    pub fn backend(&self, decision: RoutingDecision) -> Result<&Arc<dyn Backend>, FsError> {
        match decision {
            RoutingDecision::Local => Ok(&self.local),
            RoutingDecision::Remote => self.remote.as_ref().ok_or_else(|| FsError::BackendUnavailable {
                backend: RoutingDecision::Remote,
                source: StorageError::ConfigError(
                    "remote storage is enabled but no remote backend is configured".to_string(),
                ),
            }),
        }
    }

    /// Routes `path` and hands back the one backend that serves it
    pub fn select(&self, path: &FsPath) -> Result<(RoutingDecision, &Arc<dyn Backend>), FsError> {
        let decision = self.route(path);
        let backend = self.backend(decision)?;
        Ok((decision, backend))
    }
}
