#![forbid(unsafe_code)]
//! fix-attrs: normalize file ownership and permission modes from a
//! declarative JSON/YAML configuration.
//!
//! The configuration is a tree of entries, each naming a path (relative to
//! its parent entry), an `owner:group:mode` attribute declaration, and
//! optionally nested child entries or a recursive flag covering the whole
//! subtree. The tree resolves into a flat path map (symbolic identities
//! already reduced to numeric ids), which is then applied entry by entry
//! through the [`apply::AttrApplicator`] seam.
//!
//! All errors propagate as values; library code never terminates the
//! process.

pub mod apply;
pub mod config;
pub mod constants;
pub mod identity;
pub mod types;

pub use apply::{apply_all, AttrApplicator, FsApplicator};
pub use config::{build_path_map, Format};
pub use identity::{IdentityDb, IdentityResolver};
pub use types::{Attr, AttrPair, PathMap, ResolvedEntry};

use std::path::Path;

/// Load a configuration file, resolve it into a path map, and apply every
/// entry. Returns the resolved map for inspection.
pub fn run(
    config: &Path,
    format: Option<Format>,
    resolver: &mut IdentityResolver,
    applicator: &dyn AttrApplicator,
) -> types::Result<PathMap> {
    let root = config::load_path(config, format)?;
    let map = config::build_path_map(resolver, &root)?;
    apply::apply_all(&map, applicator)?;
    Ok(map)
}
