mod models;
mod path;

pub use models::*;
pub use path::{FsPath, PathError};
