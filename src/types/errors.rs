//! Error types used across fix-attrs.
use thiserror::Error;

/// High-level error categories, one per failure family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Missing or mistyped configuration key, malformed attribute token,
    /// unparseable mode literal.
    #[error("invalid configuration")]
    ConfigStructure,
    /// The same resolved path targeted by two distinct entries.
    #[error("duplicate path")]
    DuplicatePath,
    /// A user/group token resolves to neither a known name nor a numeric id.
    #[error("unknown identity")]
    UnknownIdentity,
    /// Missing target, unreadable identity database, or a failed
    /// ownership/mode change.
    #[error("filesystem error")]
    Filesystem,
}

/// Structured error with a kind and human message.
///
/// `Clone` so the identity resolver can memoize failed lookups.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, msg: msg.into() }
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
