//! Attribute application: the applicator seam and the per-entry driver.
//!
//! The driver consumes the resolved path map sequentially and fail-fast:
//! the first error aborts the run and nothing already applied is rolled
//! back. Provisioning runs want a loud half-applied state, not a quiet
//! partial success.

mod fs;

pub use fs::FsApplicator;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::{Attr, AttrPair, PathMap};

/// Capability required of the environment: set owner, group, and permission
/// bits on one filesystem object.
pub trait AttrApplicator {
    fn apply(&self, path: &Path, attr: &Attr) -> Result<()>;
}

/// Apply every entry of the path map.
///
/// Non-recursive keys containing glob metacharacters are expanded against
/// the live filesystem first; every expanded concrete path participates in
/// duplicate detection against all other non-recursive targets. Recursive
/// entries walk their subtree depth-first, choosing the dir- or file-side
/// attribute per visited object.
pub fn apply_all(map: &PathMap, applicator: &dyn AttrApplicator) -> Result<()> {
    let mut targeted: HashSet<PathBuf> = HashSet::new();
    for (key, entry) in map {
        if entry.recursive {
            apply_recursive(key, &entry.attrs, applicator)?;
            continue;
        }
        for target in expand(key)? {
            if !targeted.insert(target.clone()) {
                return Err(Error::new(
                    ErrorKind::DuplicatePath,
                    format!("duplicate path after expansion: {}", target.display()),
                ));
            }
            apply_one(&target, &entry.attrs, applicator)?;
        }
    }
    Ok(())
}

fn is_pattern(path: &Path) -> bool {
    path.to_string_lossy().contains(&['*', '?', '['][..])
}

/// Expand a glob key to concrete paths, or return the key itself verbatim.
/// A pattern matching nothing is a no-op.
fn expand(key: &Path) -> Result<Vec<PathBuf>> {
    if !is_pattern(key) {
        return Ok(vec![key.to_path_buf()]);
    }
    let pattern = key.to_str().ok_or_else(|| {
        Error::new(
            ErrorKind::ConfigStructure,
            format!("non-utf8 glob pattern: {}", key.display()),
        )
    })?;
    let matches = glob::glob(pattern).map_err(|e| {
        Error::new(ErrorKind::ConfigStructure, format!("invalid pattern {pattern:?}: {e}"))
    })?;
    let mut out = Vec::new();
    for m in matches {
        let path = m.map_err(|e| {
            Error::new(ErrorKind::Filesystem, format!("glob {pattern:?}: {e}"))
        })?;
        out.push(path);
    }
    if out.is_empty() {
        warn!("pattern {pattern} matched no paths");
    }
    Ok(out)
}

fn apply_one(path: &Path, attrs: &AttrPair, applicator: &dyn AttrApplicator) -> Result<()> {
    let md = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::new(
                ErrorKind::Filesystem,
                format!("no such file or directory: {}", path.display()),
            )
        } else {
            Error::new(ErrorKind::Filesystem, format!("stat {}: {e}", path.display()))
        }
    })?;
    let attr = if md.is_dir() { &attrs.dir } else { &attrs.file };
    debug!("applying {}:{} {:o} to {}", attr.uid, attr.gid, attr.mode, path.display());
    applicator.apply(path, attr)
}

fn apply_recursive(
    root: &Path,
    attrs: &AttrPair,
    applicator: &dyn AttrApplicator,
) -> Result<()> {
    for item in WalkDir::new(root) {
        let item = item
            .map_err(|e| Error::new(ErrorKind::Filesystem, format!("walk {}: {e}", root.display())))?;
        let attr = if item.file_type().is_dir() { &attrs.dir } else { &attrs.file };
        debug!(
            "applying {}:{} {:o} to {}",
            attr.uid,
            attr.gid,
            attr.mode,
            item.path().display()
        );
        applicator.apply(item.path(), attr)?;
    }
    Ok(())
}
