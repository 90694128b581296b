//! Default applicator backed by native chown/chmod syscalls via rustix.

use std::path::Path;

use rustix::fs::{chmod, chown, Gid, Mode, Uid};

use crate::apply::AttrApplicator;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::Attr;

/// Applies attributes with `chown(2)` and `chmod(2)`. Symlinks are followed,
/// matching the behavior of the stock chown/chmod tools without `-h`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsApplicator;

impl AttrApplicator for FsApplicator {
    fn apply(&self, path: &Path, attr: &Attr) -> Result<()> {
        chown(
            path,
            Some(Uid::from_raw(attr.uid)),
            Some(Gid::from_raw(attr.gid)),
        )
        .map_err(|e| {
            Error::new(
                ErrorKind::Filesystem,
                format!("chown {}:{} {}: {e}", attr.uid, attr.gid, path.display()),
            )
        })?;
        chmod(path, Mode::from_bits_truncate(attr.mode)).map_err(|e| {
            Error::new(
                ErrorKind::Filesystem,
                format!("chmod {:o} {}: {e}", attr.mode, path.display()),
            )
        })
    }
}
