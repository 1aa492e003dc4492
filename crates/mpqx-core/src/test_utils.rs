//! Test utilities: an in-memory [`MpqArchive`] implementation.
//!
//! This module provides a scriptable archive collaborator so that name
//! resolution, reporting, and extraction can be tested without a real MPQ
//! archive or the system library that decodes one.
//!
//! # Panics
//!
//! Helpers in this module may panic on malformed setups since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::archive::EntryFlags;
use crate::archive::MpqArchive;
use crate::error::ExtractError;
use crate::error::Result;
use crate::names::LISTFILE_LABEL;

#[derive(Debug, Clone)]
struct MemoryEntry {
    label: Option<String>,
    data: Vec<u8>,
    packed_size: u64,
    flags: EntryFlags,
    missing: bool,
}

/// An in-memory archive session for tests.
///
/// Entry indices follow insertion order on the builder. Entries added
/// with [`MemoryArchiveBuilder::add_missing`] occupy an index but fail
/// every per-entry query with [`ExtractError::NotFound`], modeling the
/// hash-table holes real archives carry.
#[derive(Debug)]
pub struct MemoryArchive {
    entries: Vec<MemoryEntry>,
}

impl MemoryArchive {
    fn entry(&self, index: u32) -> Result<&MemoryEntry> {
        match self.entries.get(index as usize) {
            Some(entry) if !entry.missing => Ok(entry),
            _ => Err(ExtractError::NotFound { index }),
        }
    }
}

impl MpqArchive for MemoryArchive {
    fn entry_count(&self) -> u32 {
        self.entries.len() as u32
    }

    fn find_entry(&mut self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .position(|entry| {
                !entry.missing && entry.label.as_deref() == Some(label)
            })
            .map(|pos| pos as u32)
    }

    fn packed_size(&mut self, index: u32) -> Result<u64> {
        Ok(self.entry(index)?.packed_size)
    }

    fn unpacked_size(&mut self, index: u32) -> Result<u64> {
        Ok(self.entry(index)?.data.len() as u64)
    }

    fn flags(&mut self, index: u32) -> Result<EntryFlags> {
        Ok(self.entry(index)?.flags)
    }

    fn read_entry(&mut self, index: u32, buf: &mut [u8]) -> Result<u64> {
        let entry = self.entry(index)?;
        let len = entry.data.len();
        assert!(buf.len() >= len, "read buffer smaller than entry content");
        buf[..len].copy_from_slice(&entry.data);
        Ok(len as u64)
    }

    fn archive_packed_size(&mut self) -> Result<u64> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.missing)
            .map(|entry| entry.packed_size)
            .sum())
    }

    fn archive_unpacked_size(&mut self) -> Result<u64> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.missing)
            .map(|entry| entry.data.len() as u64)
            .sum())
    }
}

/// Builder for [`MemoryArchive`] fixtures.
///
/// # Examples
///
/// ```
/// use mpqx_core::test_utils::MemoryArchiveBuilder;
///
/// let archive = MemoryArchiveBuilder::new()
///     .add_listfile("readme.txt")
///     .add_entry(b"hello")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct MemoryArchiveBuilder {
    entries: Vec<MemoryEntry>,
}

impl MemoryArchiveBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain entry whose packed size equals its content length.
    #[must_use]
    pub fn add_entry(self, data: &[u8]) -> Self {
        self.add_entry_with(data, data.len() as u64, EntryFlags::default())
    }

    /// Adds an entry with an explicit packed size and storage flags.
    #[must_use]
    pub fn add_entry_with(mut self, data: &[u8], packed_size: u64, flags: EntryFlags) -> Self {
        self.entries.push(MemoryEntry {
            label: None,
            data: data.to_vec(),
            packed_size,
            flags,
            missing: false,
        });
        self
    }

    /// Adds a `(listfile)` entry at the current index whose content is
    /// `text`.
    #[must_use]
    pub fn add_listfile(mut self, text: &str) -> Self {
        self.entries.push(MemoryEntry {
            label: Some(LISTFILE_LABEL.to_string()),
            data: text.as_bytes().to_vec(),
            packed_size: text.len() as u64,
            flags: EntryFlags::default(),
            missing: false,
        });
        self
    }

    /// Adds a hole: an index whose every per-entry query fails with
    /// [`ExtractError::NotFound`].
    #[must_use]
    pub fn add_missing(mut self) -> Self {
        self.entries.push(MemoryEntry {
            label: None,
            data: Vec::new(),
            packed_size: 0,
            flags: EntryFlags::default(),
            missing: true,
        });
        self
    }

    /// Finalizes the fixture.
    #[must_use]
    pub fn build(self) -> MemoryArchive {
        MemoryArchive {
            entries: self.entries,
        }
    }
}
