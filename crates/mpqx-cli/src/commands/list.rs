//! List command implementation.

use std::io;
use std::io::Write;

use anyhow::Result;
use mpqx_core::render_entry;
use mpqx_core::render_table;
use mpqx_core::report_all;
use mpqx_core::report_one;

use crate::cli::Cli;
use crate::commands::open_archive;
use crate::commands::report_missing_entry;

pub fn execute(args: &Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if args.numbers.is_empty() {
        let mut archive = open_archive(&args.archive)?;
        let report = report_all(&mut archive)?;
        render_table(&report, &args.archive, &mut stdout)?;
        return Ok(());
    }

    for (pos, &number) in args.numbers.iter().enumerate() {
        if pos > 0 {
            writeln!(stdout)?;
        }

        // One independent session per requested number.
        let mut archive = open_archive(&args.archive)?;
        match report_one(&mut archive, number - 1) {
            Ok((row, total)) => render_entry(&row, total, &mut stdout)?,
            Err(err) if err.is_skippable() => report_missing_entry(number, &args.archive),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
