//! User/group identity resolution with a per-run cache.
//!
//! Tokens follow the POSIX chown disambiguation convention:
//! - `+`-prefixed tokens are forced numeric and never consult the database
//!   (protects against a user or group whose *name* is a string of digits);
//! - anything else is looked up by name first, then parsed as a numeric id.
//!
//! The cache is owned by the resolver and lives for exactly one invocation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{DEFAULT_GROUP_FILE, DEFAULT_PASSWD_FILE};
use crate::types::errors::{Error, ErrorKind, Result};

/// Locations of the passwd- and group-format identity databases.
///
/// Both formats are colon-separated with the name in field 0 and the numeric
/// id in field 2. Paths are injectable so tests can run against scratch
/// databases.
#[derive(Clone, Debug)]
pub struct IdentityDb {
    passwd: PathBuf,
    group: PathBuf,
}

impl Default for IdentityDb {
    fn default() -> Self {
        Self {
            passwd: PathBuf::from(DEFAULT_PASSWD_FILE),
            group: PathBuf::from(DEFAULT_GROUP_FILE),
        }
    }
}

impl IdentityDb {
    pub fn new(passwd: impl Into<PathBuf>, group: impl Into<PathBuf>) -> Self {
        Self { passwd: passwd.into(), group: group.into() }
    }

    /// Scan a database file for `name`, returning its numeric id.
    ///
    /// `Ok(None)` means the name is absent; an unreadable file or a matching
    /// line with a non-numeric id field is a `Filesystem` error.
    fn lookup_name(file: &Path, name: &str) -> Result<Option<u32>> {
        let content = fs::read_to_string(file).map_err(|e| {
            Error::new(
                ErrorKind::Filesystem,
                format!("unable to read identity database {}: {e}", file.display()),
            )
        })?;
        for line in content.lines() {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() >= 3 && fields[0] == name {
                let id = fields[2].parse::<u32>().map_err(|_| {
                    Error::new(
                        ErrorKind::Filesystem,
                        format!(
                            "unable to parse id {:?} for {name} in {}",
                            fields[2],
                            file.display()
                        ),
                    )
                })?;
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

/// Resolves identity tokens to numeric ids, memoizing per raw token.
///
/// Successful and unknown-identity outcomes are cached; I/O errors reading
/// the database are not (they abort the run anyway).
pub struct IdentityResolver {
    db: IdentityDb,
    users: HashMap<String, Result<u32>>,
    groups: HashMap<String, Result<u32>>,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(IdentityDb::default())
    }
}

impl IdentityResolver {
    pub fn new(db: IdentityDb) -> Self {
        Self { db, users: HashMap::new(), groups: HashMap::new() }
    }

    /// Resolve a user token to a numeric uid.
    pub fn resolve_user(&mut self, token: &str) -> Result<u32> {
        if let Some(hit) = self.users.get(token) {
            return hit.clone();
        }
        debug!("resolving user token {token:?}");
        let res = Self::resolve(&self.db.passwd, token);
        Self::memoize(&mut self.users, token, res)
    }

    /// Resolve a group token to a numeric gid.
    pub fn resolve_group(&mut self, token: &str) -> Result<u32> {
        if let Some(hit) = self.groups.get(token) {
            return hit.clone();
        }
        debug!("resolving group token {token:?}");
        let res = Self::resolve(&self.db.group, token);
        Self::memoize(&mut self.groups, token, res)
    }

    fn resolve(db_file: &Path, token: &str) -> Result<u32> {
        if let Some(digits) = token.strip_prefix('+') {
            // Forced numeric: skip the name lookup entirely.
            return digits.parse::<u32>().map_err(|_| unknown_identity(token));
        }
        match IdentityDb::lookup_name(db_file, token)? {
            Some(id) => Ok(id),
            None => token.parse::<u32>().map_err(|_| unknown_identity(token)),
        }
    }

    fn memoize(
        cache: &mut HashMap<String, Result<u32>>,
        token: &str,
        res: Result<u32>,
    ) -> Result<u32> {
        match &res {
            Err(e) if e.kind == ErrorKind::Filesystem => res,
            _ => {
                cache.insert(token.to_string(), res.clone());
                res
            }
        }
    }
}

fn unknown_identity(token: &str) -> Error {
    Error::new(ErrorKind::UnknownIdentity, format!("unknown identity: {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn scratch_db(passwd: &str, group: &str) -> (tempfile::TempDir, IdentityDb) {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("passwd");
        let g = td.path().join("group");
        let mut f = fs::File::create(&p).unwrap();
        f.write_all(passwd.as_bytes()).unwrap();
        let mut f = fs::File::create(&g).unwrap();
        f.write_all(group.as_bytes()).unwrap();
        let db = IdentityDb::new(&p, &g);
        (td, db)
    }

    #[test]
    fn name_lookup_wins_over_numeric_parse() {
        let (_td, db) = scratch_db("www-data:x:33:33::/:/bin/false\n", "www-data:x:33:\n");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_user("www-data").unwrap(), 33);
        assert_eq!(r.resolve_group("www-data").unwrap(), 33);
    }

    #[test]
    fn plus_prefix_bypasses_name_lookup() {
        // A group literally named "42" with gid 1000 must not shadow +42.
        let (_td, db) = scratch_db("", "42:x:1000:\n");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_group("+42").unwrap(), 42);
        assert_eq!(r.resolve_group("42").unwrap(), 1000);
    }

    #[test]
    fn numeric_fallback_on_lookup_miss() {
        let (_td, db) = scratch_db("root:x:0:0::/root:/bin/sh\n", "root:x:0:\n");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_user("1000").unwrap(), 1000);
    }

    #[test]
    fn unknown_identity_carries_token() {
        let (_td, db) = scratch_db("", "");
        let mut r = IdentityResolver::new(db);
        let err = r.resolve_user("nosuchuser").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownIdentity);
        assert!(err.msg.contains("nosuchuser"), "{}", err.msg);
    }

    #[test]
    fn second_resolution_is_served_from_cache() {
        let (td, db) = scratch_db("alice:x:501:501::/:/bin/sh\n", "");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_user("alice").unwrap(), 501);
        // Remove the database; a cache hit must not touch the file again.
        fs::remove_file(td.path().join("passwd")).unwrap();
        assert_eq!(r.resolve_user("alice").unwrap(), 501);
        // An uncached token now fails on the unreadable database.
        assert_eq!(r.resolve_user("bob").unwrap_err().kind, ErrorKind::Filesystem);
    }

    #[test]
    fn failed_resolutions_are_cached_too() {
        let (td, db) = scratch_db("", "");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_group("ghost").unwrap_err().kind, ErrorKind::UnknownIdentity);
        fs::remove_file(td.path().join("group")).unwrap();
        assert_eq!(r.resolve_group("ghost").unwrap_err().kind, ErrorKind::UnknownIdentity);
    }

    #[test]
    fn unreadable_database_is_a_filesystem_error() {
        let db = IdentityDb::new("/nonexistent/passwd", "/nonexistent/group");
        let mut r = IdentityResolver::new(db);
        assert_eq!(r.resolve_user("alice").unwrap_err().kind, ErrorKind::Filesystem);
    }
}
