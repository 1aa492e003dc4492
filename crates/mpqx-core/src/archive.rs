//! The collaborator boundary: what an opened archive session must provide.
//!
//! The MPQ container format, its decompression and decryption, and entry
//! enumeration all live behind [`MpqArchive`]; this crate never parses
//! archive bytes itself. The `libmpq` crate implements the trait over the
//! system libmpq library, and [`crate::test_utils::MemoryArchive`]
//! implements it in memory for tests.

use crate::error::Result;

/// Per-entry storage flags reported by the archive library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFlags {
    /// Entry content is encrypted inside the archive.
    pub encrypted: bool,
    /// Entry content is compressed.
    pub compressed: bool,
    /// Entry content uses PKWARE implode.
    pub imploded: bool,
}

/// Transient per-entry metadata, scoped to one reporting or extraction step.
#[derive(Debug, Clone, Copy)]
pub struct EntryMetadata {
    /// Stored (packed) size in bytes.
    pub packed_size: u64,
    /// Decoded (unpacked) size in bytes.
    pub unpacked_size: u64,
    /// Storage flags.
    pub flags: EntryFlags,
}

/// An opened archive session.
///
/// Implementations own whatever handle the underlying library needs and
/// release it on drop, so the archive is closed on every exit path.
/// Query methods take `&mut self` because the underlying read cursor is a
/// single-writer resource; iteration over entries is strictly sequential.
pub trait MpqArchive {
    /// Total number of entries in the archive.
    fn entry_count(&self) -> u32;

    /// Looks up an entry by its stored label, e.g. `"(listfile)"`.
    fn find_entry(&mut self, label: &str) -> Option<u32>;

    /// Stored size of entry `index` in bytes.
    ///
    /// # Errors
    ///
    /// [`crate::ExtractError::NotFound`] when the archive has no such
    /// entry, or a collaborator error for unreadable metadata.
    fn packed_size(&mut self, index: u32) -> Result<u64>;

    /// Decoded size of entry `index` in bytes.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::packed_size`].
    fn unpacked_size(&mut self, index: u32) -> Result<u64>;

    /// Storage flags of entry `index`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::packed_size`].
    fn flags(&mut self, index: u32) -> Result<EntryFlags>;

    /// Reads the decompressed, decrypted content of entry `index` into
    /// `buf`, returning the number of bytes transferred. `buf` must hold
    /// at least [`Self::unpacked_size`] bytes for the entry.
    ///
    /// # Errors
    ///
    /// [`crate::ExtractError::NotFound`] for a missing entry, or a
    /// collaborator error when decoding fails partway.
    fn read_entry(&mut self, index: u32, buf: &mut [u8]) -> Result<u64>;

    /// The archive's self-reported aggregate packed size.
    ///
    /// # Errors
    ///
    /// A collaborator error when the archive header is unreadable.
    fn archive_packed_size(&mut self) -> Result<u64>;

    /// The archive's self-reported aggregate unpacked size.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::archive_packed_size`].
    fn archive_unpacked_size(&mut self) -> Result<u64>;

    /// Gathers the sizes and flags of entry `index` in one call.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::packed_size`].
    fn metadata(&mut self, index: u32) -> Result<EntryMetadata> {
        Ok(EntryMetadata {
            packed_size: self.packed_size(index)?,
            unpacked_size: self.unpacked_size(index)?,
            flags: self.flags(index)?,
        })
    }
}
