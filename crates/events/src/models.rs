use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { uploads_root: String, remote_enabled: bool },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Backends
    LocalRootCreated { path: String },
    BackendReady { routing: String, backend: String },
    RemoteDisabled,

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
