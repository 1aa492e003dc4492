//! Command implementations.

pub mod extract;
pub mod list;

use std::path::Path;

use anyhow::Result;
use anyhow::bail;
use libmpq::Archive;
use mpqx_core::ExtractError;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    if cli.list {
        list::execute(cli)
    } else {
        extract::execute(cli)
    }
}

/// Opens a fresh archive session. An open failure aborts the whole
/// invocation, so no further entry numbers are processed.
fn open_archive(path: &Path) -> Result<Archive> {
    match Archive::open(path) {
        Ok(archive) => Ok(archive),
        Err(ExtractError::OpenFailed { .. }) => {
            bail!("'{}' no such file or directory", path.display())
        }
        Err(err) => Err(err.into()),
    }
}

/// One-line stderr note for a requested entry number the archive does not
/// have; the caller continues with the next requested number.
fn report_missing_entry(number: u32, path: &Path) {
    eprintln!(
        "mpqx: no such entry {number} in archive '{}'",
        path.display()
    );
}
