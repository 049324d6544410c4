use chrono::{DateTime, Utc};
use std::path::Path;

pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `YYYY/MM` folder that uploads made at `at` are filed under
pub fn yearmonth_subdir(at: DateTime<Utc>) -> String {
    at.format("%Y/%m").to_string()
}
