pub mod attr;
pub mod errors;

pub use attr::{Attr, AttrPair, PathMap, ResolvedEntry};
pub use errors::{Error, ErrorKind, Result};
