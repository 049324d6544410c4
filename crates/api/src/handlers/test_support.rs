use super::models::AppState;
use mountfs_filesystem::{BackendRouter, FilesystemFacade};
use mountfs_models::FsPath;
use mountfs_storage::{Backend, LocalBackend, MemoryObjectClient, RemoteObjectBackend};
use std::sync::Arc;
use tempfile::TempDir;

/// Handler state over a temp-dir local backend and an in-memory object store
pub(crate) struct TestServer {
    _root: TempDir,
    pub(crate) state: AppState,
    pub(crate) objects: Arc<MemoryObjectClient>,
}

impl TestServer {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().unwrap();
        let uploads = FsPath::parse("wp-content/uploads").unwrap();

        let objects = Arc::new(MemoryObjectClient::new());
        let local: Arc<dyn Backend> = Arc::new(LocalBackend::new(root.path().to_path_buf()));
        let remote: Arc<dyn Backend> = Arc::new(RemoteObjectBackend::new(objects.clone(), uploads.clone()));

        let router = BackendRouter::new(uploads, true, local, Some(remote));
        let facade = FilesystemFacade::new(router, 1024);

        Self {
            _root: root,
            state: AppState::new(Arc::new(facade)),
            objects,
        }
    }
}
