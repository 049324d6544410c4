use mountfs_models::{FsPath, RoutingDecision};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecursiveQuery {
    pub path: String,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChmodRequest {
    pub path: String,
    /// Octal permission string such as `"0644"` or `"755"`
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChownRequest {
    pub path: String,
    pub uid: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChgrpRequest {
    pub path: String,
    pub gid: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeRequest {
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeResponse {
    pub filename: String,
    pub changed: bool,
}

/// Path actually used by a mutating call, after sanitization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub path: FsPath,
    pub backend: RoutingDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub path: FsPath,
    pub entries: Vec<FsPath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub path: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path: FsPath,
    pub backend: RoutingDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
