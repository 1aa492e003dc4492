//! Extraction orchestration: iterate entries, resolve names, materialize.
//!
//! Drives the name resolver and path materializer across one or all
//! entries, requesting decoded content from the archive collaborator and
//! writing it under a destination root. Per-entry "missing" failures are
//! isolated; everything else aborts the run.

use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::archive::MpqArchive;
use crate::error::ExtractError;
use crate::error::Result;
use crate::materialize::DIR_MODE;
use crate::materialize::ensure_directories;
use crate::materialize::normalize_path;
use crate::materialize::open_for_write;
use crate::names::EntryNameTable;

/// Extracts entry `index` under `dest`, using names from `table`.
///
/// Writes one `extracting <name>` progress line to `out`, creates missing
/// directories, fetches the decoded content in a single collaborator
/// read, and writes it through a buffered writer. The final flush-on-
/// close failure is [`ExtractError::CloseFailed`], which is fatal for the
/// whole run, not just this entry. The output file handle is released on
/// every exit path, and an entry the collaborator reports as missing
/// removes the just-created file so a skipped entry leaves nothing on
/// disk.
///
/// The resolved name is trusted: `..` segments are not rejected (see
/// DESIGN.md).
///
/// # Errors
///
/// [`ExtractError::OpenFailed`] when directories or the target file
/// cannot be created, [`ExtractError::OutOfMemory`] when the entry buffer
/// cannot be allocated, [`ExtractError::CloseFailed`] on the final flush,
/// plus any error the collaborator raises while reading.
pub fn extract_one<A, W>(
    archive: &mut A,
    index: u32,
    table: &EntryNameTable,
    dest: &Path,
    out: &mut W,
) -> Result<()>
where
    A: MpqArchive + ?Sized,
    W: Write,
{
    let name = table.resolve(index);
    let relative = normalize_path(&name);
    writeln!(out, "extracting {relative}")?;

    ensure_directories(dest, &relative, DIR_MODE)?;
    let target = dest.join(&relative);
    let file = open_for_write(&target)?;

    write_content(archive, index, file, &target).inspect_err(|err| {
        // The file was already created above; a skippable entry must not
        // leave an empty husk behind for its caller to skip over.
        if err.is_skippable() {
            let _ = std::fs::remove_file(&target);
        }
    })
}

/// Reads entry `index` in one collaborator call and writes it through a
/// buffered writer to the already-opened `file`.
fn write_content<A: MpqArchive + ?Sized>(
    archive: &mut A,
    index: u32,
    file: std::fs::File,
    target: &Path,
) -> Result<()> {
    let size = archive.unpacked_size(index)?;
    let len = usize::try_from(size).map_err(|_| ExtractError::OutOfMemory { size })?;
    let mut content = Vec::new();
    content
        .try_reserve_exact(len)
        .map_err(|_| ExtractError::OutOfMemory { size })?;
    content.resize(len, 0);
    archive.read_entry(index, &mut content)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&content)?;
    writer.into_inner().map_err(|_| ExtractError::CloseFailed {
        path: target.to_path_buf(),
    })?;
    Ok(())
}

/// Extracts every entry in ascending index order under `dest`.
///
/// Builds the name table once for the whole pass. Entries the
/// collaborator reports as missing are skipped with a note to `out`; any
/// other failure aborts the run immediately. The name table is released
/// on every exit path.
///
/// # Errors
///
/// Listfile read failures from the table build, or any non-skippable
/// error from [`extract_one`].
pub fn extract_all<A, W>(archive: &mut A, dest: &Path, out: &mut W) -> Result<()>
where
    A: MpqArchive + ?Sized,
    W: Write,
{
    let table = EntryNameTable::build(archive)?;
    report_table_state(&table, out)?;

    for index in 0..archive.entry_count() {
        match extract_one(archive, index, &table, dest, out) {
            Ok(()) => {}
            Err(err) if err.is_skippable() => {
                writeln!(out, "skipping entry {index}: {err}")?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Extracts exactly one entry, bounds-checked against the entry count.
///
/// # Errors
///
/// [`ExtractError::NotFound`] for an out-of-range index, otherwise the
/// failure modes of [`extract_one`].
pub fn extract_single<A, W>(archive: &mut A, index: u32, dest: &Path, out: &mut W) -> Result<()>
where
    A: MpqArchive + ?Sized,
    W: Write,
{
    if index >= archive.entry_count() {
        return Err(ExtractError::NotFound { index });
    }
    let table = EntryNameTable::build(archive)?;
    report_table_state(&table, out)?;
    extract_one(archive, index, &table, dest, out)
}

/// Writes the listfile notices gathered during table construction.
fn report_table_state<W: Write>(table: &EntryNameTable, out: &mut W) -> Result<()> {
    if !table.is_loaded() {
        writeln!(out, "archive has no listfile")?;
    } else if table.unresolved() > 0 {
        writeln!(
            out,
            "warning: listfile incomplete ({} entries unresolved)",
            table.unresolved()
        )?;
    }
    Ok(())
}
