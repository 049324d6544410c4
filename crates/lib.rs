// Re-export all public APIs from the workspace crates

pub use mountfs_models as models;
pub use mountfs_events as events;
pub use mountfs_utils as utils;
pub use mountfs_storage as storage;
pub use mountfs_filesystem as filesystem;
pub use mountfs_config as config;
pub use mountfs_api as api;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use mountfs_models::{FileKind, FileMetadata, FsPath, ReasonCode, RoutingDecision};

    // Validation and sanitization
    pub use mountfs_utils::{sanitize, PathValidator, ValidationFailure};

    // Backends
    pub use mountfs_storage::{
        Backend, LocalBackend, MemoryObjectClient, ObjectClient, RemoteObjectBackend, StorageError,
    };
    #[cfg(feature = "s3")]
    pub use mountfs_storage::S3ObjectClient;

    // Routing and the facade
    pub use mountfs_filesystem::{BackendRouter, FilesystemFacade, FsError};

    // Events
    pub use mountfs_events::{AppEvent, EventBus};

    // Configuration
    pub use mountfs_config::Config;
}
