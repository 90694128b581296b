//! Attribute token parsing.
//!
//! An attribute token has the form `owner:group:mode`. Owner and group are
//! identity tokens handed to the resolver; mode is an octal literal. The two
//! declaration conventions (`attr` shared by directories and files, or the
//! `attr-dir`/`attr-file` split) both resolve to one [`AttrPair`].

use std::collections::BTreeMap;

use crate::config::node::{opt_string_val, Node};
use crate::constants::{KEY_ATTR, KEY_ATTR_DIR, KEY_ATTR_FILE};
use crate::identity::IdentityResolver;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::{Attr, AttrPair};

/// Parse one `owner:group:mode` token into a fully resolved [`Attr`].
///
/// `key` names the configuration key the token came from and is used only
/// in diagnostics. Resolution short-circuits at the first failure, in
/// owner, group, mode order.
pub fn parse_attr(resolver: &mut IdentityResolver, key: &str, token: &str) -> Result<Attr> {
    let parts: Vec<&str> = token.split(':').collect();
    let (owner, group, mode) = match parts.as_slice() {
        [owner, group, mode] => (*owner, *group, *mode),
        _ => {
            return Err(Error::new(
                ErrorKind::ConfigStructure,
                format!("unable to parse attributes for key: {key} (expected owner:group:mode)"),
            ))
        }
    };

    let uid = resolver.resolve_user(owner)?;
    let gid = resolver.resolve_group(group)?;
    let mode = u32::from_str_radix(mode, 8).map_err(|_| {
        Error::new(
            ErrorKind::ConfigStructure,
            format!("invalid octal mode {mode:?} for key: {key}"),
        )
    })?;

    Ok(Attr { uid, gid, mode })
}

/// Resolve an entry's attribute declaration into an [`AttrPair`].
///
/// A shared `attr` token wins when present and applies to both sides;
/// otherwise both `attr-dir` and `attr-file` are required. Either
/// convention is accepted for recursive and non-recursive entries alike.
pub fn parse_attr_pair(
    resolver: &mut IdentityResolver,
    entry: &BTreeMap<String, Node>,
) -> Result<AttrPair> {
    if let Some(token) = opt_string_val(entry, KEY_ATTR)? {
        let attr = parse_attr(resolver, KEY_ATTR, token)?;
        return Ok(AttrPair::uniform(attr));
    }

    let Some(dir_token) = opt_string_val(entry, KEY_ATTR_DIR)? else {
        return Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("key not found: {KEY_ATTR} (or {KEY_ATTR_DIR}/{KEY_ATTR_FILE})"),
        ));
    };
    let Some(file_token) = opt_string_val(entry, KEY_ATTR_FILE)? else {
        return Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("key not found: {KEY_ATTR_FILE}"),
        ));
    };

    Ok(AttrPair {
        dir: parse_attr(resolver, KEY_ATTR_DIR, dir_token)?,
        file: parse_attr(resolver, KEY_ATTR_FILE, file_token)?,
    })
}
