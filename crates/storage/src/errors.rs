use mountfs_models::PathError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "s3")]
    #[error("S3 SDK error: {0}")]
    S3SdkError(String),

    #[error("Read failed for '{0}': {1}")]
    ReadError(String, String),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Delete failed for '{0}': {1}")]
    DeleteError(String, String),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("The `{method}` method is not implemented and/or not supported by {backend}")]
    Unsupported { method: String, backend: String },

    #[error("Invalid path: {0}")]
    PathError(#[from] PathError),

    #[error("Join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::FileNotFound(_) => true,
            StorageError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Tags an I/O failure with the path it happened on
    pub(crate) fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::FileNotFound(path.to_string())
        } else {
            StorageError::IoError(err)
        }
    }
}
