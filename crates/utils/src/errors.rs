use mountfs_models::ReasonCode;
use thiserror::Error;

/// Tagged validation failure; validators return it, they never panic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    pub reason: ReasonCode,
    pub message: String,
}

pub type ValidationResult = Result<(), ValidationFailure>;

impl ValidationFailure {
    pub fn path_too_long(max_length: usize) -> Self {
        Self {
            reason: ReasonCode::PathTooLong,
            message: format!(
                "The file name and path cannot exceed {} characters. Please rename the file to something shorter and try again.",
                max_length
            ),
        }
    }

    pub fn unsafe_characters(path: &str) -> Self {
        Self {
            reason: ReasonCode::UnsafeCharacters,
            message: format!(
                "The file name or path '{}' contains unsafe characters. Please rename the file to something safe for object storage key names.",
                path
            ),
        }
    }
}
