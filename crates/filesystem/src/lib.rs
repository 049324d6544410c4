mod errors;
mod facade;
mod router;

pub use errors::{parse_path, FsError};
pub use facade::FilesystemFacade;
pub use router::BackendRouter;
