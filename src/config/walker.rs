//! Configuration tree walker: generic document tree in, resolved path map out.
//!
//! A sequence at the root (or anywhere an entry tree is expected) is a list
//! of independent root-level trees; a mapping is one entry; anything else is
//! a structural error. The walk is fatal on first error and never returns a
//! partial map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::attr::parse_attr_pair;
use crate::config::node::{opt_bool_val, opt_seq_val, string_val, Node};
use crate::constants::{KEY_FILES, KEY_PATH, KEY_RECURSIVE};
use crate::identity::IdentityResolver;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::{PathMap, ResolvedEntry};

/// Interpret a document tree into the flat path map.
pub fn build_path_map(resolver: &mut IdentityResolver, root: &Node) -> Result<PathMap> {
    let mut map = PathMap::new();
    walk_root(resolver, root, &mut map)?;
    Ok(map)
}

fn walk_root(resolver: &mut IdentityResolver, node: &Node, map: &mut PathMap) -> Result<()> {
    match node {
        Node::Sequence(items) => {
            for item in items {
                walk_root(resolver, item, map)?;
            }
            Ok(())
        }
        Node::Mapping(entry) => walk_entry(resolver, Path::new(""), entry, map),
        Node::Scalar(_) => Err(Error::new(
            ErrorKind::ConfigStructure,
            "expected an entry object or an array of entry objects",
        )),
    }
}

/// Join a child segment under its parent entry's resolved path.
///
/// A leading slash on a child segment does not escape its parent; only
/// root-level entries can be absolute.
fn join_entry_path(parent: &Path, segment: &str) -> PathBuf {
    if parent.as_os_str().is_empty() {
        PathBuf::from(segment)
    } else {
        parent.join(segment.trim_start_matches('/'))
    }
}

fn walk_entry(
    resolver: &mut IdentityResolver,
    parent: &Path,
    entry: &BTreeMap<String, Node>,
    map: &mut PathMap,
) -> Result<()> {
    let segment = string_val(entry, KEY_PATH)?;
    let recursive = opt_bool_val(entry, KEY_RECURSIVE)?.unwrap_or(false);
    let full = join_entry_path(parent, segment);
    let attrs = parse_attr_pair(resolver, entry)?;

    if map.contains_key(&full) {
        return Err(Error::new(
            ErrorKind::DuplicatePath,
            format!("duplicate path: {}", full.display()),
        ));
    }
    debug!("mapped {} (recursive: {recursive})", full.display());
    map.insert(full.clone(), ResolvedEntry { recursive, attrs });

    if recursive {
        // Descendants of a recursive entry come from the filesystem walk at
        // apply time, never from the configuration tree.
        if entry.contains_key(KEY_FILES) {
            warn!(
                "{} list ignored for recursive entry {}",
                KEY_FILES,
                full.display()
            );
        }
        return Ok(());
    }

    if let Some(children) = opt_seq_val(entry, KEY_FILES)? {
        for child in children {
            let Some(child_entry) = child.as_mapping() else {
                return Err(Error::new(
                    ErrorKind::ConfigStructure,
                    format!("expected an entry object in {KEY_FILES}"),
                ));
            };
            walk_entry(resolver, &full, child_entry, map)?;
        }
    }
    Ok(())
}
