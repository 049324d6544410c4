use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable once loaded; shared behind an `Arc`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::filesystem_settings")]
    pub filesystem: FilesystemSettings,
    #[serde(default = "super::defaults::local_settings")]
    pub local: LocalSettings,
    #[serde(default = "super::defaults::remote_settings")]
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_body_size")]
    pub max_body_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilesystemSettings {
    #[serde(default = "super::defaults::uploads_root")]
    pub uploads_root: String,
    #[serde(default = "super::defaults::max_path_length")]
    pub max_path_length: usize,
    #[serde(default)]
    pub remote_enabled: bool,
    #[serde(default = "super::defaults::uploads_use_yearmonth_folders")]
    pub uploads_use_yearmonth_folders: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalSettings {
    #[serde(default = "super::defaults::local_root")]
    pub root: PathBuf,
    #[serde(default = "super::defaults::file_mode")]
    pub file_mode: u32,
    #[serde(default = "super::defaults::dir_mode")]
    pub dir_mode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteClientKind {
    S3,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteSettings {
    #[serde(default = "super::defaults::remote_client")]
    pub client: RemoteClientKind,
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "super::defaults::s3_bucket_name")]
    pub bucket_name: String,
    #[serde(default)]
    pub bucket_prefix: String,
}
