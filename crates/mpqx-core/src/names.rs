//! Entry name resolution via the archive's internal listfile.
//!
//! MPQ archives address entries by index, not by name. An archive may
//! carry a `(listfile)` resource whose decoded content is one relative
//! path per line, in entry order; this module loads it into an
//! [`EntryNameTable`] and answers "what is the path for entry N?" for any
//! index, synthesizing a deterministic placeholder when no name is known.

use std::borrow::Cow;

use crate::archive::MpqArchive;
use crate::error::ExtractError;
use crate::error::Result;

/// Label under which the listing resource is stored in the archive.
pub const LISTFILE_LABEL: &str = "(listfile)";

/// Name assigned to the listing resource's own slot.
pub const LISTFILE_NAME: &str = "listfile.txt";

/// Longest resolved name kept from a listfile line, in bytes.
///
/// Historical cap inherited from `PATH_MAX`-sized name buffers; longer
/// lines are truncated, not rejected.
pub const MAX_NAME_LEN: usize = 4096;

/// The index → relative-path table for one archive session.
///
/// Built once after the entry count is known, consulted by every
/// iteration over entries, and released when dropped. [`Self::resolve`]
/// is total: an index with no listfile name gets a placeholder, so name
/// resolution never fails for callers holding a valid table.
#[derive(Debug)]
pub struct EntryNameTable {
    names: Vec<Option<String>>,
    loaded: bool,
}

impl EntryNameTable {
    /// Loads the listfile (if any) and assigns one line per entry slot,
    /// in archive order. The listfile's own slot is reserved for
    /// [`LISTFILE_NAME`] and consumes no line, so line-to-slot alignment
    /// is preserved for every other entry.
    ///
    /// An archive without a listfile yields an unloaded table; every
    /// lookup then falls back to placeholder naming. A listfile with too
    /// few lines leaves the trailing slots unresolved, which
    /// [`Self::unresolved`] reports without failing the build.
    ///
    /// # Errors
    ///
    /// Returns an error only when the listfile exists but its content
    /// cannot be read from the archive.
    pub fn build<A: MpqArchive + ?Sized>(archive: &mut A) -> Result<Self> {
        let total = archive.entry_count() as usize;
        let mut names: Vec<Option<String>> = vec![None; total];

        let Some(listfile_index) = archive.find_entry(LISTFILE_LABEL) else {
            return Ok(Self {
                names,
                loaded: false,
            });
        };

        let size = archive.unpacked_size(listfile_index)?;
        let len = usize::try_from(size).map_err(|_| ExtractError::OutOfMemory { size })?;
        let mut content = Vec::new();
        content
            .try_reserve_exact(len)
            .map_err(|_| ExtractError::OutOfMemory { size })?;
        content.resize(len, 0);
        archive.read_entry(listfile_index, &mut content)?;
        let text = String::from_utf8_lossy(&content);

        // strtok-style tokenization: CR and LF both delimit, empty tokens
        // (blank lines, CRLF pairs) are skipped.
        let mut lines = text.split(['\r', '\n']).filter(|line| !line.is_empty());

        let reserved = listfile_index as usize;
        for (slot, name) in names.iter_mut().enumerate() {
            if slot == reserved {
                *name = Some(LISTFILE_NAME.to_string());
                continue;
            }
            match lines.next() {
                Some(line) => *name = Some(truncate_name(line)),
                None => break,
            }
        }

        // Some archives end the line stream before the reserved slot is
        // reached; fill it regardless.
        if let Some(slot) = names.get_mut(reserved) {
            if slot.is_none() {
                *slot = Some(LISTFILE_NAME.to_string());
            }
        }

        Ok(Self {
            names,
            loaded: true,
        })
    }

    /// Whether a listing resource was found and parsed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of entry slots in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table covers zero entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of slots a loaded listfile left unresolved. Nonzero means
    /// the listfile was incomplete; affected entries resolve to
    /// placeholders. Always zero for an unloaded table.
    #[must_use]
    pub fn unresolved(&self) -> usize {
        if !self.loaded {
            return 0;
        }
        self.names.iter().filter(|name| name.is_none()).count()
    }

    /// Resolves the archive-native relative path of entry `index`.
    ///
    /// Never fails: an index without a listfile name (or any index at all
    /// when no listfile exists) yields `file<index zero-padded to 6>.xxx`.
    #[must_use]
    pub fn resolve(&self, index: u32) -> Cow<'_, str> {
        if self.loaded {
            if let Some(Some(name)) = self.names.get(index as usize) {
                return Cow::Borrowed(name);
            }
        }
        Cow::Owned(format!("file{index:06}.xxx"))
    }
}

/// Caps a listfile line at [`MAX_NAME_LEN`] bytes without splitting a
/// UTF-8 sequence.
fn truncate_name(line: &str) -> String {
    if line.len() <= MAX_NAME_LEN {
        return line.to_string();
    }
    let mut end = MAX_NAME_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryArchiveBuilder;

    #[test]
    fn test_no_listfile_yields_placeholders() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"a")
            .add_entry(b"b")
            .add_entry(b"c")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert!(!table.is_loaded());
        assert_eq!(table.unresolved(), 0);
        assert_eq!(table.resolve(0), "file000000.xxx");
        assert_eq!(table.resolve(1), "file000001.xxx");
        assert_eq!(table.resolve(2), "file000002.xxx");
    }

    #[test]
    fn test_reserved_slot_consumes_no_line() {
        // Listfile at index 1: its slot gets the fixed label while the
        // two lines land on indices 0 and 2.
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"payload")
            .add_listfile("a/b.txt\nc.txt")
            .add_entry(b"other")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert!(table.is_loaded());
        assert_eq!(table.unresolved(), 0);
        assert_eq!(table.resolve(0), "a/b.txt");
        assert_eq!(table.resolve(1), LISTFILE_NAME);
        assert_eq!(table.resolve(2), "c.txt");
    }

    #[test]
    fn test_crlf_and_blank_lines_are_skipped() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_listfile("first.txt\r\n\r\n\nsecond.txt\r\n")
            .add_entry(b"1")
            .add_entry(b"2")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert_eq!(table.resolve(0), LISTFILE_NAME);
        assert_eq!(table.resolve(1), "first.txt");
        assert_eq!(table.resolve(2), "second.txt");
    }

    #[test]
    fn test_incomplete_listfile_is_nonfatal() {
        let mut archive = MemoryArchiveBuilder::new()
            .add_listfile("only.txt")
            .add_entry(b"1")
            .add_entry(b"2")
            .add_entry(b"3")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert!(table.is_loaded());
        assert_eq!(table.unresolved(), 2);
        assert_eq!(table.resolve(1), "only.txt");
        // Unresolved slots still resolve, via the placeholder.
        assert_eq!(table.resolve(2), "file000002.xxx");
        assert_eq!(table.resolve(3), "file000003.xxx");
    }

    #[test]
    fn test_reserved_slot_filled_when_lines_run_out_early() {
        // Listfile is the last entry and the line stream covers nothing,
        // so the loop breaks before reaching the reserved slot.
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"1")
            .add_entry(b"2")
            .add_listfile("")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert_eq!(table.unresolved(), 2);
        assert_eq!(table.resolve(2), LISTFILE_NAME);
    }

    #[test]
    fn test_exact_line_count_fills_every_slot() {
        // total_entries - 1 lines: every non-reserved slot is filled.
        let mut archive = MemoryArchiveBuilder::new()
            .add_listfile("a.txt\nb.txt\nc.txt")
            .add_entry(b"1")
            .add_entry(b"2")
            .add_entry(b"3")
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert_eq!(table.unresolved(), 0);
        assert_eq!(table.resolve(0), LISTFILE_NAME);
        assert_eq!(table.resolve(1), "a.txt");
        assert_eq!(table.resolve(2), "b.txt");
        assert_eq!(table.resolve(3), "c.txt");
    }

    #[test]
    fn test_out_of_range_resolve_uses_placeholder() {
        let mut archive = MemoryArchiveBuilder::new().add_entry(b"1").build();
        let table = EntryNameTable::build(&mut archive).unwrap();
        assert_eq!(table.resolve(99), "file000099.xxx");
    }

    #[test]
    fn test_long_lines_are_truncated_not_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 100);
        let mut archive = MemoryArchiveBuilder::new()
            .add_entry(b"1")
            .add_listfile(&long)
            .build();

        let table = EntryNameTable::build(&mut archive).unwrap();
        assert_eq!(table.resolve(0).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut long = "y".repeat(MAX_NAME_LEN - 1);
        long.push('é'); // two bytes, straddles the cap
        assert!(long.len() > MAX_NAME_LEN);
        let truncated = truncate_name(&long);
        assert_eq!(truncated.len(), MAX_NAME_LEN - 1);
    }
}
