use mountfs_models::{FsPath, ReasonCode, RoutingDecision};
use mountfs_storage::StorageError;
use mountfs_utils::ValidationFailure;
use thiserror::Error;

/// Every failure the facade reports; each one maps to a stable [`ReasonCode`]
#[derive(Error, Debug)]
pub enum FsError {
    #[error("{message}")]
    PathTooLong { path: String, message: String },

    #[error("{message}")]
    UnsafeCharacters { path: String, message: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Cannot rename '{from}' ({from_backend}) to '{to}' ({to_backend}): moving between backends is not supported")]
    CrossBackendRenameUnsupported {
        from: String,
        to: String,
        from_backend: RoutingDecision,
        to_backend: RoutingDecision,
    },

    #[error("{backend} backend failed: {source}")]
    BackendUnavailable {
        backend: RoutingDecision,
        #[source]
        source: StorageError,
    },

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("The `{method}` method is not implemented and/or not supported by {backend}")]
    Unsupported { method: String, backend: String },
}

impl FsError {
    pub fn reason(&self) -> ReasonCode {
        match self {
            FsError::PathTooLong { .. } => ReasonCode::PathTooLong,
            FsError::UnsafeCharacters { .. } => ReasonCode::UnsafeCharacters,
            FsError::InvalidPath { .. } => ReasonCode::InvalidPath,
            FsError::CrossBackendRenameUnsupported { .. } => ReasonCode::CrossBackendRenameUnsupported,
            FsError::BackendUnavailable { .. } => ReasonCode::BackendUnavailable,
            FsError::NotFound { .. } => ReasonCode::NotFound,
            FsError::Unsupported { .. } => ReasonCode::UnimplementedMethod,
        }
    }

    pub(crate) fn from_validation(path: &FsPath, failure: ValidationFailure) -> Self {
        let path = path.to_string();
        match failure.reason {
            ReasonCode::PathTooLong => FsError::PathTooLong {
                path,
                message: failure.message,
            },
            ReasonCode::UnsafeCharacters => FsError::UnsafeCharacters {
                path,
                message: failure.message,
            },
            _ => FsError::InvalidPath {
                path,
                reason: failure.message,
            },
        }
    }

    /// Backend failures pass through; only the not-found case gets its own kind
    pub(crate) fn from_storage(backend: RoutingDecision, path: &FsPath, err: StorageError) -> Self {
        match err {
            err if err.is_not_found() => FsError::NotFound {
                path: path.to_string(),
            },
            StorageError::Unsupported { method, backend: described } => FsError::Unsupported {
                method,
                backend: described,
            },
            source => FsError::BackendUnavailable { backend, source },
        }
    }
}

/// Parses caller input into a normalized path, failing with `InvalidPath`
pub fn parse_path(raw: &str) -> Result<FsPath, FsError> {
    FsPath::parse(raw).map_err(|e| FsError::InvalidPath {
        path: raw.replace('\0', "\\0"),
        reason: e.to_string(),
    })
}
