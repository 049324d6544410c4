use super::models::AppState;
use axum::extract::FromRef;
use mountfs_filesystem::FilesystemFacade;
use std::sync::Arc;

impl AppState {
    pub fn new(facade: Arc<FilesystemFacade>) -> Self {
        Self { facade }
    }

    pub fn facade(&self) -> &FilesystemFacade {
        &self.facade
    }
}

impl FromRef<AppState> for Arc<FilesystemFacade> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.facade)
    }
}
