mod backend;
mod errors;
mod local;
mod memory;
mod object;
mod remote;

#[cfg(feature = "s3")]
mod s3;

pub use backend::Backend;
pub use errors::*;
pub use local::LocalBackend;
pub use memory::MemoryObjectClient;
pub use object::{ObjectClient, ObjectInfo};
pub use remote::RemoteObjectBackend;

#[cfg(feature = "s3")]
pub use s3::S3ObjectClient;
