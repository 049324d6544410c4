pub mod path;
pub mod sanitize;
pub mod validate;
pub mod errors;

pub use path::*;
pub use sanitize::*;
pub use validate::*;
pub use errors::*;
