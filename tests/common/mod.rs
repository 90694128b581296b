//! Shared test helpers for the fix-attrs integration tests.
#![allow(dead_code)] // not every test crate uses every helper

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fix_attrs::types::Result;
use fix_attrs::{Attr, AttrApplicator, IdentityDb, IdentityResolver};

/// Write scratch passwd/group databases into `dir` and build a resolver
/// over them.
pub fn scratch_resolver(dir: &Path, passwd: &str, group: &str) -> IdentityResolver {
    let p = dir.join("passwd");
    let g = dir.join("group");
    let mut f = std::fs::File::create(&p).unwrap();
    f.write_all(passwd.as_bytes()).unwrap();
    let mut f = std::fs::File::create(&g).unwrap();
    f.write_all(group.as_bytes()).unwrap();
    IdentityResolver::new(IdentityDb::new(p, g))
}

/// A resolver with empty databases; only numeric tokens resolve.
pub fn numeric_resolver(dir: &Path) -> IdentityResolver {
    scratch_resolver(dir, "", "")
}

/// An in-memory applicator recording every (path, attr) it is asked to
/// apply, in call order.
#[derive(Default)]
pub struct RecordingApplicator {
    pub applied: Mutex<Vec<(PathBuf, Attr)>>,
}

impl AttrApplicator for RecordingApplicator {
    fn apply(&self, path: &Path, attr: &Attr) -> Result<()> {
        self.applied.lock().unwrap().push((path.to_path_buf(), *attr));
        Ok(())
    }
}

/// Effective uid/gid of the test process, read off a file it just created.
pub fn current_ids(dir: &Path) -> (u32, u32) {
    use std::os::unix::fs::MetadataExt;
    let probe = dir.join(".id-probe");
    std::fs::write(&probe, b"").unwrap();
    let md = std::fs::metadata(&probe).unwrap();
    (md.uid(), md.gid())
}

/// Permission bits of a path.
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata(path).unwrap().mode() & 0o7777
}
