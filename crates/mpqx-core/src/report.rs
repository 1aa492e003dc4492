//! Read-only reporting: per-entry metadata rows and rendered summaries.
//!
//! The read-only counterpart of extraction: resolves names and gathers
//! size/flag metadata per entry without writing anything, then renders a
//! table (whole archive) or a labeled field list (single entry).

use std::io;
use std::io::Write;
use std::path::Path;

use crate::archive::MpqArchive;
use crate::error::ExtractError;
use crate::error::Result;
use crate::names::EntryNameTable;

/// Metadata and resolved name for one entry.
#[derive(Debug, Clone)]
pub struct ReportRow {
    /// 0-based entry index.
    pub index: u32,
    /// Stored size in bytes.
    pub packed: u64,
    /// Decoded size in bytes.
    pub unpacked: u64,
    /// Entry is compressed.
    pub compressed: bool,
    /// Entry uses PKWARE implode.
    pub imploded: bool,
    /// Entry is encrypted.
    pub encrypted: bool,
    /// Resolved archive-native name (not normalized for the filesystem).
    pub name: String,
}

/// Whole-archive report: one row per readable entry plus totals.
#[derive(Debug)]
pub struct ArchiveReport {
    /// Per-entry rows in ascending index order. Entries the collaborator
    /// reports as missing are skipped, so this may be shorter than
    /// `total_entries`.
    pub rows: Vec<ReportRow>,
    /// Collaborator-reported entry count.
    pub total_entries: u32,
    /// Sum of row packed sizes.
    pub sum_packed: u64,
    /// Sum of row unpacked sizes.
    pub sum_unpacked: u64,
    /// The archive's self-reported aggregate packed size.
    pub archive_packed: u64,
    /// The archive's self-reported aggregate unpacked size.
    pub archive_unpacked: u64,
    /// Whether a listfile was found.
    pub listfile_loaded: bool,
    /// Slots the listfile left unresolved.
    pub unresolved_names: usize,
}

/// Percentage points saved by compression:
/// `100 − |packed / unpacked × 100|`.
///
/// `unpacked == 0` is defined as ratio 0. The absolute value is kept from
/// the original signed-size arithmetic; an entry whose packed size
/// exceeds its unpacked size still yields a negative ratio, which is the
/// expansion signal and deliberately not clamped.
#[must_use]
pub fn compression_ratio(packed: u64, unpacked: u64) -> f64 {
    if unpacked == 0 {
        return 0.0;
    }
    100.0 - (packed as f64 / unpacked as f64 * 100.0).abs()
}

/// Gathers one row for every readable entry, skipping entries the
/// collaborator reports as missing (mirrors extraction's skip policy).
///
/// # Errors
///
/// Listfile read failures from the table build, or any non-skippable
/// collaborator error while gathering metadata.
pub fn report_all<A: MpqArchive + ?Sized>(archive: &mut A) -> Result<ArchiveReport> {
    let table = EntryNameTable::build(archive)?;
    let total = archive.entry_count();

    let mut rows = Vec::with_capacity(total as usize);
    let mut sum_packed = 0u64;
    let mut sum_unpacked = 0u64;

    for index in 0..total {
        let meta = match archive.metadata(index) {
            Ok(meta) => meta,
            Err(err) if err.is_skippable() => continue,
            Err(err) => return Err(err),
        };
        sum_packed += meta.packed_size;
        sum_unpacked += meta.unpacked_size;
        rows.push(ReportRow {
            index,
            packed: meta.packed_size,
            unpacked: meta.unpacked_size,
            compressed: meta.flags.compressed,
            imploded: meta.flags.imploded,
            encrypted: meta.flags.encrypted,
            name: table.resolve(index).into_owned(),
        });
    }

    Ok(ArchiveReport {
        rows,
        total_entries: total,
        sum_packed,
        sum_unpacked,
        archive_packed: archive.archive_packed_size()?,
        archive_unpacked: archive.archive_unpacked_size()?,
        listfile_loaded: table.is_loaded(),
        unresolved_names: table.unresolved(),
    })
}

/// Gathers one bounds-checked row, plus the total entry count for the
/// `<index>/<total>` heading.
///
/// # Errors
///
/// [`ExtractError::NotFound`] when `index` is out of range, otherwise the
/// failure modes of [`report_all`].
pub fn report_one<A: MpqArchive + ?Sized>(archive: &mut A, index: u32) -> Result<(ReportRow, u32)> {
    let total = archive.entry_count();
    if index >= total {
        return Err(ExtractError::NotFound { index });
    }

    let table = EntryNameTable::build(archive)?;
    let meta = archive.metadata(index)?;
    let row = ReportRow {
        index,
        packed: meta.packed_size,
        unpacked: meta.unpacked_size,
        compressed: meta.flags.compressed,
        imploded: meta.flags.imploded,
        encrypted: meta.flags.encrypted,
        name: table.resolve(index).into_owned(),
    };
    Ok((row, total))
}

const TABLE_RULE: &str = "------   -----------   -------------   -----   ---   ---   ---   --------";

/// Renders the whole-archive table: listfile notices, header, one row per
/// entry, a totals row naming the archive path, and the archive's
/// self-reported aggregate sizes.
///
/// # Errors
///
/// Write failures on `w`.
pub fn render_table<W: Write>(
    report: &ArchiveReport,
    archive_path: &Path,
    w: &mut W,
) -> io::Result<()> {
    if !report.listfile_loaded {
        writeln!(w, "archive has no listfile")?;
    } else if report.unresolved_names > 0 {
        writeln!(
            w,
            "warning: listfile incomplete ({} entries unresolved)",
            report.unresolved_names
        )?;
    }

    writeln!(
        w,
        "number   packed size   unpacked size   ratio   cmp   imp   enc   filename"
    )?;
    writeln!(w, "{TABLE_RULE}")?;

    for row in &report.rows {
        writeln!(
            w,
            "{:>6}   {:>11}   {:>13}   {:>4.0}%   {:>3}   {:>3}   {:>3}   {}",
            row.index,
            row.packed,
            row.unpacked,
            compression_ratio(row.packed, row.unpacked),
            yes_no(row.compressed),
            yes_no(row.imploded),
            yes_no(row.encrypted),
            row.name
        )?;
    }

    writeln!(w, "{TABLE_RULE}")?;
    writeln!(
        w,
        "{:>6}   {:>11}   {:>13}   {:>4.0}%   {}",
        report.total_entries,
        report.sum_packed,
        report.sum_unpacked,
        compression_ratio(report.sum_packed, report.sum_unpacked),
        archive_path.display()
    )?;
    writeln!(w, "archive packed size:   {}", report.archive_packed)?;
    writeln!(w, "archive unpacked size: {}", report.archive_unpacked)?;
    Ok(())
}

/// Renders a single entry as a labeled field list.
///
/// # Errors
///
/// Write failures on `w`.
pub fn render_entry<W: Write>(row: &ReportRow, total_entries: u32, w: &mut W) -> io::Result<()> {
    writeln!(w, "file number:            {}/{}", row.index, total_entries)?;
    writeln!(w, "file packed size:       {}", row.packed)?;
    writeln!(w, "file unpacked size:     {}", row.unpacked)?;
    writeln!(
        w,
        "file compression ratio: {:.2}%",
        compression_ratio(row.packed, row.unpacked)
    )?;
    writeln!(w, "file compressed:        {}", yes_no(row.compressed))?;
    writeln!(w, "file imploded:          {}", yes_no(row.imploded))?;
    writeln!(w, "file encrypted:         {}", yes_no(row.encrypted))?;
    writeln!(w, "file name:              {}", row.name)?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::archive::EntryFlags;
    use crate::test_utils::MemoryArchiveBuilder;

    #[test]
    fn test_ratio_equal_sizes_is_zero() {
        assert!((compression_ratio(100, 100)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_zero_packed_is_hundred() {
        assert!((compression_ratio(0, 4096) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_zero_unpacked_is_zero() {
        assert!(compression_ratio(50, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_expansion_goes_negative() {
        assert!(compression_ratio(300, 200) < 0.0);
    }

    #[test]
    fn test_report_all_without_listfile() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry_with(b"aaaa", 2, EntryFlags::default())
            .add_entry_with(b"bbbb", 4, EntryFlags {
                compressed: true,
                ..Default::default()
            })
            .add_entry(b"cc")
            .build();

        let report = report_all(&mut archive).unwrap();
        assert_eq!(report.total_entries, 3);
        assert!(!report.listfile_loaded);
        assert_eq!(report.rows[0].name, "file000000.xxx");
        assert_eq!(report.rows[1].name, "file000001.xxx");
        assert_eq!(report.rows[2].name, "file000002.xxx");
        assert_eq!(report.sum_packed, 2 + 4 + 2);
        assert_eq!(report.sum_unpacked, 4 + 4 + 2);
        assert!(report.rows[1].compressed);
    }

    #[test]
    fn test_report_all_skips_missing_entries() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"a")
            .add_missing()
            .add_entry(b"c")
            .build();

        let report = report_all(&mut archive).unwrap();
        assert_eq!(report.total_entries, 3);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].index, 2);
    }

    #[test]
    fn test_report_one_out_of_range() {
        let mut archive = MemoryArchiveBuilder::new().add_entry(b"a").build();
        let err = report_one(&mut archive, 3).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { index: 3 }));
    }

    #[test]
    fn test_report_one_resolves_listfile_name() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_listfile("sound/intro.wav")
            .add_entry(b"RIFF")
            .build();

        let (row, total) = report_one(&mut archive, 1).unwrap();
        assert_eq!(total, 2);
        assert_eq!(row.name, "sound/intro.wav");
        assert_eq!(row.unpacked, 4);
    }

    #[test]
    fn test_render_table_has_rows_and_totals() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"aaaa")
            .add_entry(b"bb")
            .build();
        let report = report_all(&mut archive).unwrap();

        let mut out = Vec::new();
        render_table(&report, Path::new("test.mpq"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("file000000.xxx"));
        assert!(text.contains("file000001.xxx"));
        assert!(text.contains("test.mpq"));
        assert!(text.contains("archive packed size:"));
        // Rows, two rules, header, totals, notices.
        assert!(text.lines().count() >= 8);
    }

    #[test]
    fn test_render_entry_field_list() {
        let row = ReportRow {
            index: 4,
            packed: 30,
            unpacked: 100,
            compressed: true,
            imploded: false,
            encrypted: false,
            name: "war3map.j".to_string(),
        };

        let mut out = Vec::new();
        render_entry(&row, 9, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("file number:            4/9"));
        assert!(text.contains("file compression ratio: 70.00%"));
        assert!(text.contains("file compressed:        yes"));
        assert!(text.contains("file name:              war3map.j"));
    }
}
