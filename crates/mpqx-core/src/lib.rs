//! Listing and extraction of MPQ archive entries.
//!
//! `mpqx-core` drives an opened archive session (the [`MpqArchive`]
//! trait, implemented over the system libmpq library by the `libmpq`
//! crate) to report entry metadata or materialize entry content on disk.
//! Names come from the archive's optional `(listfile)` resource; entries
//! without a listed name get deterministic `fileNNNNNN.xxx` placeholders,
//! so every operation is total over the archive's index space.
//!
//! # Examples
//!
//! ```
//! use mpqx_core::report_all;
//! use mpqx_core::test_utils::MemoryArchiveBuilder;
//!
//! # fn main() -> mpqx_core::Result<()> {
//! let mut archive = MemoryArchiveBuilder::new()
//!     .add_listfile("readme.txt")
//!     .add_entry(b"hello")
//!     .build();
//! let report = report_all(&mut archive)?;
//! assert_eq!(report.rows[1].name, "readme.txt");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod extract;
pub mod materialize;
pub mod names;
pub mod report;
pub mod test_utils;

// Re-export main API types
pub use archive::EntryFlags;
pub use archive::EntryMetadata;
pub use archive::MpqArchive;
pub use error::ExtractError;
pub use error::Result;
pub use extract::extract_all;
pub use extract::extract_single;
pub use names::EntryNameTable;
pub use report::ArchiveReport;
pub use report::ReportRow;
pub use report::compression_ratio;
pub use report::render_entry;
pub use report::render_table;
pub use report::report_all;
pub use report::report_one;
