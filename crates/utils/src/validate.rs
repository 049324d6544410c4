use crate::errors::{ValidationFailure, ValidationResult};
use mountfs_models::FsPath;
use regex::Regex;
use std::sync::LazyLock;

/// Longest key object storage accepts
pub const DEFAULT_MAX_PATH_LENGTH: usize = 1024;

// Safe characters from the S3 object key naming guidelines
static SAFE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9()!*'/._-]+$").expect("safe key pattern is valid")
});

/// Checks a candidate key against object-storage length and character rules.
///
/// Rules are applied in order and the first failure wins:
/// 1. at most `max_length` Unicode code points
/// 2. only `[A-Za-z0-9()!*'._-]` and `/`, and no trailing `.`
///
/// Call it on the final (sanitized, normalized) path, never on raw input.
pub fn validate_key(path: &str, max_length: usize) -> ValidationResult {
    if path.chars().count() > max_length {
        return Err(ValidationFailure::path_too_long(max_length));
    }

    if !SAFE_KEY.is_match(path) || path.ends_with('.') {
        return Err(ValidationFailure::unsafe_characters(path));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct PathValidator {
    max_length: usize,
}

impl PathValidator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn validate(&self, path: &FsPath) -> ValidationResult {
        validate_key(path.as_str(), self.max_length)
    }
}

impl Default for PathValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PATH_LENGTH)
    }
}
