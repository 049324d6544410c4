use crate::path::FsPath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which backend serves a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingDecision {
    Remote,
    Local,
}

impl RoutingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::Remote => "remote",
            RoutingDecision::Local => "local",
        }
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable failure codes surfaced to callers (upload handlers, HTTP clients)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    PathTooLong,
    UnsafeCharacters,
    InvalidPath,
    CrossBackendRenameUnsupported,
    BackendUnavailable,
    NotFound,
    UnimplementedMethod,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::PathTooLong => "path-too-long",
            ReasonCode::UnsafeCharacters => "unsafe-characters",
            ReasonCode::InvalidPath => "invalid-path",
            ReasonCode::CrossBackendRenameUnsupported => "cross-backend-rename-unsupported",
            ReasonCode::BackendUnavailable => "backend-unavailable",
            ReasonCode::NotFound => "not-found",
            ReasonCode::UnimplementedMethod => "unimplemented-method",
        }
    }

    /// Validation failures are detected before any backend call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReasonCode::PathTooLong | ReasonCode::UnsafeCharacters | ReasonCode::InvalidPath
        )
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: FsPath,
    pub kind: FileKind,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileMetadata {
    pub fn directory(path: FsPath) -> Self {
        Self {
            path,
            kind: FileKind::Directory,
            size: 0,
            modified: None,
            content_type: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}
