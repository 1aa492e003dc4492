//! Filesystem materialization of archive-native relative paths.
//!
//! Archive names use backslash separators and may nest arbitrarily deep;
//! before an entry can be written its separators are normalized and every
//! missing directory prefix is created, one filesystem call per
//! component.

use std::fs::DirBuilder;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::ExtractError;
use crate::error::Result;

/// Mode for created intermediate directories (the umask applies).
pub const DIR_MODE: u32 = 0o777;

/// Converts archive-native backslash separators to forward slashes.
///
/// No other validation happens here; in particular `..` segments pass
/// through unchanged, so a crafted listfile can direct output outside the
/// extraction root (see DESIGN.md). Idempotent.
#[must_use]
pub fn normalize_path(name: &str) -> String {
    name.replace('\\', "/")
}

/// Creates every missing directory prefix of `path` under `base`.
///
/// `path` uses forward slashes. One `DirBuilder` call is made per
/// directory component; the final filename component is not created.
/// Already-existing directories are fine, and any failure other than the
/// two distinguished ones below is tolerated, matching the collaborator's
/// tolerant stance on partially pre-existing trees.
///
/// # Errors
///
/// [`ExtractError::PermissionDenied`] when a component cannot be created
/// for lack of rights, [`ExtractError::NotADirectory`] when something
/// that is not a directory already occupies a component. Both abort the
/// current entry.
pub fn ensure_directories(base: &Path, path: &str, mode: u32) -> Result<()> {
    #[cfg(not(unix))]
    let _ = mode;

    for (pos, _) in path.match_indices('/') {
        let prefix = &path[..pos];
        if prefix.is_empty() {
            continue;
        }
        let dir = base.join(prefix);

        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }

        match builder.create(&dir) {
            Ok(()) => {}
            Err(err) => match err.kind() {
                io::ErrorKind::PermissionDenied => {
                    return Err(ExtractError::PermissionDenied { path: dir });
                }
                io::ErrorKind::NotADirectory => {
                    return Err(ExtractError::NotADirectory { path: dir });
                }
                _ => {}
            },
        }
    }
    Ok(())
}

/// Opens (creating or truncating) the target file for binary writing.
///
/// # Errors
///
/// [`ExtractError::OpenFailed`] when the file cannot be created.
pub fn open_for_write(path: &Path) -> Result<File> {
    File::create(path).map_err(|_| ExtractError::OpenFailed {
        path: path.to_path_buf(),
    })
}
