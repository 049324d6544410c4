use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path contains a null byte: {0}")]
    NullByte(String),

    #[error("Path escapes its root: {0}")]
    EscapesRoot(String),
}

/// Normalized, forward-slash path relative to the content root (or absolute).
///
/// Construction goes through [`FsPath::parse`], so a value of this type never
/// is empty, never contains `.` or `..` segments, and never ends with a
/// separator (except the absolute root `/`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FsPath(String);

impl FsPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        if raw.contains('\0') {
            return Err(PathError::NullByte(raw.replace('\0', "\\0")));
        }

        let unified = raw.replace('\\', "/");
        let absolute = unified.starts_with('/');

        let mut segments: Vec<&str> = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    if segments.pop().is_none() {
                        return Err(PathError::EscapesRoot(raw.to_string()));
                    }
                }
                other => segments.push(other),
            }
        }

        let joined = segments.join("/");
        match (absolute, joined.is_empty()) {
            (true, _) => Ok(Self(format!("/{}", joined))),
            (false, true) => Err(PathError::Empty),
            (false, false) => Ok(Self(joined)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Last segment, `None` for the absolute root
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    pub fn parent(&self) -> Option<FsPath> {
        let (head, _) = self.0.rsplit_once('/')?;
        if head.is_empty() {
            // "/name" -> "/", but "/" itself has no parent
            return (!self.is_root()).then(|| FsPath("/".to_string()));
        }
        Some(FsPath(head.to_string()))
    }

    pub fn join(&self, tail: &str) -> Result<FsPath, PathError> {
        if tail.contains('\0') {
            return Err(PathError::NullByte(tail.replace('\0', "\\0")));
        }
        let combined = format!("{}/{}", self.0, tail);
        let joined = FsPath::parse(&combined)?;
        if !joined.starts_with(self) {
            return Err(PathError::EscapesRoot(combined));
        }
        Ok(joined)
    }

    /// Replaces the last segment
    pub fn with_file_name(&self, name: &str) -> Result<FsPath, PathError> {
        match self.parent() {
            Some(parent) => parent.join(name),
            None if self.is_absolute() => FsPath::parse(&format!("/{}", name)),
            None => FsPath::parse(name),
        }
    }

    /// Segment-wise prefix test; `uploads-old` is not under `uploads`
    pub fn starts_with(&self, base: &FsPath) -> bool {
        if self.is_absolute() != base.is_absolute() {
            return false;
        }
        let mut own = self.segments();
        base.segments().all(|segment| own.next() == Some(segment))
    }

    /// Remaining segments below `base`, empty when both are equal
    pub fn relative_to(&self, base: &FsPath) -> Option<String> {
        if !self.starts_with(base) {
            return None;
        }
        let skip = base.segments().count();
        Some(self.segments().skip(skip).collect::<Vec<_>>().join("/"))
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FsPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FsPath::parse(s)
    }
}

impl TryFrom<String> for FsPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FsPath::parse(&value)
    }
}

impl From<FsPath> for String {
    fn from(path: FsPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(raw: &str) -> FsPath {
        FsPath::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(p("uploads/2024//05/").as_str(), "uploads/2024/05");
        assert_eq!(p("./uploads/./a.png").as_str(), "uploads/a.png");
        assert_eq!(p("uploads\\2024\\a.png").as_str(), "uploads/2024/a.png");
        assert_eq!(p("/var/www/../www/uploads").as_str(), "/var/www/uploads");
        assert_eq!(p("/").as_str(), "/");
        assert_eq!(p("///").as_str(), "/");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(FsPath::parse(""), Err(PathError::Empty));
        assert_eq!(FsPath::parse("./."), Err(PathError::Empty));
        assert!(matches!(FsPath::parse("a\0b"), Err(PathError::NullByte(_))));
        assert!(matches!(FsPath::parse("../etc"), Err(PathError::EscapesRoot(_))));
        assert!(matches!(FsPath::parse("/.."), Err(PathError::EscapesRoot(_))));
        assert!(matches!(FsPath::parse("a/../../b"), Err(PathError::EscapesRoot(_))));
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let root = p("wp-content/uploads");
        assert!(p("wp-content/uploads").starts_with(&root));
        assert!(p("wp-content/uploads/2024/a.png").starts_with(&root));
        assert!(!p("wp-content/uploads-old/a.png").starts_with(&root));
        assert!(!p("/wp-content/uploads/a.png").starts_with(&root));
        assert!(p("/anything").starts_with(&p("/")));
    }

    #[test]
    fn test_parent_and_file_name() {
        assert_eq!(p("uploads/a.png").parent(), Some(p("uploads")));
        assert_eq!(p("/a.png").parent(), Some(p("/")));
        assert_eq!(p("/").parent(), None);
        assert_eq!(p("a.png").parent(), None);
        assert_eq!(p("uploads/a.png").file_name(), Some("a.png"));
        assert_eq!(p("/").file_name(), None);
    }

    #[test]
    fn test_join_and_rename_segment() {
        let dir = p("uploads/2024");
        assert_eq!(dir.join("05/a.png").unwrap(), p("uploads/2024/05/a.png"));
        assert!(matches!(dir.join("../../etc"), Err(PathError::EscapesRoot(_))));
        assert_eq!(
            p("uploads/b c.png").with_file_name("b-c.png").unwrap(),
            p("uploads/b-c.png")
        );
        assert_eq!(p("/a").with_file_name("b").unwrap(), p("/b"));
        assert_eq!(p("a").with_file_name("b").unwrap(), p("b"));
    }

    #[test]
    fn test_relative_to() {
        let root = p("uploads");
        assert_eq!(p("uploads/2024/a.png").relative_to(&root), Some("2024/a.png".to_string()));
        assert_eq!(p("uploads").relative_to(&root), Some(String::new()));
        assert_eq!(p("themes/a.css").relative_to(&root), None);
    }

    #[test]
    fn test_serde_goes_through_parse() {
        let path: FsPath = serde_json::from_str("\"uploads//a.png/\"").unwrap();
        assert_eq!(path.as_str(), "uploads/a.png");
        assert!(serde_json::from_str::<FsPath>("\"../x\"").is_err());
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"uploads/a.png\"");
    }
}
