use mountfs_filesystem::FilesystemFacade;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) facade: Arc<FilesystemFacade>,
}
