//! Data-only types for resolved path attributes.
//! Centralized under `crate::types` for cross-layer reuse.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fully resolved target state for one filesystem object.
///
/// All three fields are concrete numeric values; symbolic owner/group names
/// never survive past parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attr {
    /// Numeric user id of the owner.
    pub uid: u32,
    /// Numeric group id.
    pub gid: u32,
    /// Permission bits, parsed from an octal literal such as `755`.
    pub mode: u32,
}

/// Directory/file attribute pair for one configuration entry.
///
/// Entries declaring a single `attr` token resolve to a pair with both sides
/// equal; entries using the `attr-dir`/`attr-file` split resolve each side
/// independently. The choice between `dir` and `file` is made against the
/// live filesystem object at apply time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrPair {
    pub dir: Attr,
    pub file: Attr,
}

impl AttrPair {
    /// A pair applying the same attribute to directories and files.
    pub fn uniform(attr: Attr) -> Self {
        Self { dir: attr, file: attr }
    }
}

/// One resolved entry of the path map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// When true, `attrs` covers the whole subtree rooted at the path,
    /// per-object kind decided during the filesystem walk.
    pub recursive: bool,
    pub attrs: AttrPair,
}

/// Final flat mapping from configured path (or glob pattern) to its
/// resolved entry. Keys are unique; a duplicate is a configuration error
/// caught during construction.
pub type PathMap = BTreeMap<PathBuf, ResolvedEntry>;
