/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_body_size() -> usize {
    100
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn enable_compression() -> bool {
    true
}

// Filesystem defaults
pub fn uploads_root() -> String {
    "wp-content/uploads".to_string()
}

pub fn max_path_length() -> usize {
    1024
}

pub fn uploads_use_yearmonth_folders() -> bool {
    true
}

pub fn filesystem_settings() -> super::models::FilesystemSettings {
    super::models::FilesystemSettings {
        uploads_root: uploads_root(),
        max_path_length: max_path_length(),
        remote_enabled: false,
        uploads_use_yearmonth_folders: uploads_use_yearmonth_folders(),
    }
}

// Local backend defaults
pub fn local_root() -> std::path::PathBuf {
    std::path::PathBuf::from("wordpress")
}

pub fn file_mode() -> u32 {
    0o644
}

pub fn dir_mode() -> u32 {
    0o755
}

pub fn local_settings() -> super::models::LocalSettings {
    super::models::LocalSettings {
        root: local_root(),
        file_mode: file_mode(),
        dir_mode: dir_mode(),
    }
}

// Remote backend defaults
pub fn remote_client() -> super::models::RemoteClientKind {
    super::models::RemoteClientKind::S3
}

pub fn s3_region() -> String {
    "auto".to_string()
}

pub fn s3_bucket_name() -> String {
    "mountfs".to_string()
}

pub fn remote_settings() -> super::models::RemoteSettings {
    super::models::RemoteSettings {
        client: remote_client(),
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        bucket_name: s3_bucket_name(),
        bucket_prefix: String::new(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# mountfs Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
max_body_size_mb = 100               # Max request body size in MB
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

# ===============================================================================
# ROUTING
# ===============================================================================
[filesystem]
uploads_root = "wp-content/uploads"  # Paths under this prefix go to remote storage
max_path_length = 1024               # Longest accepted path, in characters
remote_enabled = false               # Route uploads to remote storage (env: MOUNTFS_REMOTE_ENABLED)
uploads_use_yearmonth_folders = true # File uploads under YYYY/MM sub-folders

# ===============================================================================
# LOCAL BACKEND
# ===============================================================================
[local]
root = "wordpress"                   # Directory every local path resolves beneath
file_mode = 0o644                    # Permissions for new files (Unix)
dir_mode = 0o755                     # Permissions for new directories (Unix)

# ===============================================================================
# REMOTE BACKEND
# ===============================================================================
[remote]
client = "s3"                        # "s3" (needs the s3 feature) or "memory"
endpoint_url = ""                    # S3 endpoint (e.g., https://s3.amazonaws.com)
region = "auto"                      # S3 region (e.g., us-east-1 or "auto")
access_key_id = ""                   # AWS Access Key ID
secret_access_key = ""               # AWS Secret Access Key
bucket_name = "mountfs"              # S3 bucket name
bucket_prefix = ""                   # Prefix for all S3 keys (optional)
"#;
