//! Shared crate-wide constants for fix-attrs.
//!
//! Centralizes the configuration vocabulary and identity-database defaults
//! used across modules.

/// Entry key holding the path segment, joined against the parent entry.
pub const KEY_PATH: &str = "path";

/// Entry key switching an entry into recursive subtree mode.
pub const KEY_RECURSIVE: &str = "recursive";

/// Entry key for the shared `owner:group:mode` token applied to both
/// directories and files.
pub const KEY_ATTR: &str = "attr";

/// Entry key for the directory-side attribute of a split declaration.
pub const KEY_ATTR_DIR: &str = "attr-dir";

/// Entry key for the file-side attribute of a split declaration.
pub const KEY_ATTR_FILE: &str = "attr-file";

/// Entry key for the nested child-entry list of a non-recursive entry.
pub const KEY_FILES: &str = "files";

/// Identity database consulted for user-name lookups.
pub const DEFAULT_PASSWD_FILE: &str = "/etc/passwd";

/// Identity database consulted for group-name lookups.
pub const DEFAULT_GROUP_FILE: &str = "/etc/group";
