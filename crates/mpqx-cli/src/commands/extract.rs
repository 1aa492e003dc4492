//! Extract command implementation.

use std::io;
use std::path::Path;

use anyhow::Result;
use mpqx_core::extract_all;
use mpqx_core::extract_single;

use crate::cli::Cli;
use crate::commands::open_archive;
use crate::commands::report_missing_entry;

pub fn execute(args: &Cli) -> Result<()> {
    // Entries materialize relative to the working directory, mirroring the
    // archive's internal path structure.
    let dest = Path::new(".");
    let mut stdout = io::stdout().lock();

    if args.numbers.is_empty() {
        let mut archive = open_archive(&args.archive)?;
        extract_all(&mut archive, dest, &mut stdout)?;
        return Ok(());
    }

    for &number in &args.numbers {
        // One independent session per requested number.
        let mut archive = open_archive(&args.archive)?;
        match extract_single(&mut archive, number - 1, dest, &mut stdout) {
            Ok(()) => {}
            Err(err) if err.is_skippable() => report_missing_entry(number, &args.archive),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
