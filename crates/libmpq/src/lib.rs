//! Safe wrapper over the system libmpq library.
//!
//! libmpq owns everything about the MPQ container format: header parsing,
//! hash/block table lookups, decryption, and the various decompression
//! schemes. This crate exposes one opened archive as an [`Archive`] that
//! implements [`mpqx_core::MpqArchive`], translating libmpq's negative
//! return codes into [`mpqx_core::ExtractError`] values.

use std::ffi::CStr;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::path::PathBuf;
use std::ptr;

use mpqx_core::EntryFlags;
use mpqx_core::ExtractError;
use mpqx_core::MpqArchive;
use mpqx_core::Result;

mod ffi;

/// Version string of the linked libmpq library.
#[must_use]
pub fn version() -> String {
    let ptr = unsafe { ffi::libmpq__version() };
    if ptr.is_null() {
        return "unknown".to_string();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Short description of a libmpq return code.
fn describe(code: i32) -> &'static str {
    match code {
        ffi::LIBMPQ_ERROR_OPEN => "open error",
        ffi::LIBMPQ_ERROR_CLOSE => "close error",
        ffi::LIBMPQ_ERROR_SEEK => "seek error",
        ffi::LIBMPQ_ERROR_READ => "read error",
        ffi::LIBMPQ_ERROR_WRITE => "write error",
        ffi::LIBMPQ_ERROR_MALLOC => "memory allocation error",
        ffi::LIBMPQ_ERROR_FORMAT => "file format error",
        ffi::LIBMPQ_ERROR_NOT_INITIALIZED => "library not initialized",
        ffi::LIBMPQ_ERROR_SIZE => "buffer size error",
        ffi::LIBMPQ_ERROR_EXIST => "file or block does not exist",
        ffi::LIBMPQ_ERROR_DECRYPT => "decryption error",
        ffi::LIBMPQ_ERROR_UNPACK => "decompression error",
        _ => "unknown error",
    }
}

/// Maps a per-entry libmpq failure to the typed error space.
///
/// `LIBMPQ_ERROR_EXIST` is the "hole in the hash table" signal and maps
/// to the skippable [`ExtractError::NotFound`]; everything else is
/// treated as corruption of the archive being read.
fn entry_error(code: i32, index: u32) -> ExtractError {
    if code == ffi::LIBMPQ_ERROR_EXIST {
        ExtractError::NotFound { index }
    } else {
        ExtractError::Corrupt(format!("{} (libmpq error {code})", describe(code)))
    }
}

/// libmpq reports sizes as signed 64-bit values; a negative one would
/// mean a library bug, so clamp rather than propagate nonsense.
fn to_size(value: ffi::libmpq__off_t) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// An MPQ archive opened through libmpq.
///
/// The underlying handle is closed on drop, so the archive is released on
/// every exit path. Not `Send`: libmpq keeps per-archive read state that
/// must stay on one thread.
#[derive(Debug)]
pub struct Archive {
    handle: *mut ffi::mpq_archive_s,
    path: PathBuf,
    entry_count: u32,
}

impl Archive {
    /// Opens the archive at `path` and reads its entry count.
    ///
    /// # Errors
    ///
    /// [`ExtractError::OpenFailed`] when libmpq cannot open the file (it
    /// does not exist, is unreadable, or carries no MPQ header), and
    /// [`ExtractError::Corrupt`] when the entry count is unreadable from
    /// an otherwise openable archive.
    pub fn open(path: &Path) -> Result<Self> {
        let open_failed = || ExtractError::OpenFailed {
            path: path.to_path_buf(),
        };
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| open_failed())?;

        let mut handle = ptr::null_mut();
        // -1 lets libmpq search the file for the archive header offset.
        let ret = unsafe { ffi::libmpq__archive_open(&mut handle, c_path.as_ptr(), -1) };
        if ret < 0 || handle.is_null() {
            return Err(open_failed());
        }

        let mut files = 0u32;
        let ret = unsafe { ffi::libmpq__archive_files(handle, &mut files) };
        if ret < 0 {
            unsafe { ffi::libmpq__archive_close(handle) };
            return Err(ExtractError::Corrupt(format!(
                "{} (libmpq error {ret})",
                describe(ret)
            )));
        }

        Ok(Self {
            handle,
            path: path.to_path_buf(),
            entry_count: files,
        })
    }

    /// The path the archive was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Archive {
    fn drop(&mut self) {
        let ret = unsafe { ffi::libmpq__archive_close(self.handle) };
        debug_assert_eq!(ret, 0, "libmpq__archive_close failed");
    }
}

impl MpqArchive for Archive {
    fn entry_count(&self) -> u32 {
        self.entry_count
    }

    fn find_entry(&mut self, label: &str) -> Option<u32> {
        let c_label = CString::new(label).ok()?;
        let mut number = 0u32;
        let ret = unsafe { ffi::libmpq__file_number(self.handle, c_label.as_ptr(), &mut number) };
        (ret == 0).then_some(number)
    }

    fn packed_size(&mut self, index: u32) -> Result<u64> {
        let mut size = 0;
        let ret = unsafe { ffi::libmpq__file_size_packed(self.handle, index, &mut size) };
        if ret < 0 {
            return Err(entry_error(ret, index));
        }
        Ok(to_size(size))
    }

    fn unpacked_size(&mut self, index: u32) -> Result<u64> {
        let mut size = 0;
        let ret = unsafe { ffi::libmpq__file_size_unpacked(self.handle, index, &mut size) };
        if ret < 0 {
            return Err(entry_error(ret, index));
        }
        Ok(to_size(size))
    }

    fn flags(&mut self, index: u32) -> Result<EntryFlags> {
        let mut encrypted = 0u32;
        let mut compressed = 0u32;
        let mut imploded = 0u32;

        let ret = unsafe { ffi::libmpq__file_encrypted(self.handle, index, &mut encrypted) };
        if ret < 0 {
            return Err(entry_error(ret, index));
        }
        let ret = unsafe { ffi::libmpq__file_compressed(self.handle, index, &mut compressed) };
        if ret < 0 {
            return Err(entry_error(ret, index));
        }
        let ret = unsafe { ffi::libmpq__file_imploded(self.handle, index, &mut imploded) };
        if ret < 0 {
            return Err(entry_error(ret, index));
        }

        Ok(EntryFlags {
            encrypted: encrypted != 0,
            compressed: compressed != 0,
            imploded: imploded != 0,
        })
    }

    fn read_entry(&mut self, index: u32, buf: &mut [u8]) -> Result<u64> {
        let out_size = ffi::libmpq__off_t::try_from(buf.len())
            .map_err(|_| ExtractError::OutOfMemory {
                size: buf.len() as u64,
            })?;

        let mut transferred = 0;
        let ret = unsafe {
            ffi::libmpq__file_read(
                self.handle,
                index,
                buf.as_mut_ptr(),
                out_size,
                &mut transferred,
            )
        };
        if ret < 0 {
            if ret == ffi::LIBMPQ_ERROR_MALLOC {
                return Err(ExtractError::OutOfMemory {
                    size: buf.len() as u64,
                });
            }
            return Err(entry_error(ret, index));
        }
        Ok(to_size(transferred))
    }

    fn archive_packed_size(&mut self) -> Result<u64> {
        let mut size = 0;
        let ret = unsafe { ffi::libmpq__archive_size_packed(self.handle, &mut size) };
        if ret < 0 {
            return Err(ExtractError::Corrupt(format!(
                "{} (libmpq error {ret})",
                describe(ret)
            )));
        }
        Ok(to_size(size))
    }

    fn archive_unpacked_size(&mut self) -> Result<u64> {
        let mut size = 0;
        let ret = unsafe { ffi::libmpq__archive_size_unpacked(self.handle, &mut size) };
        if ret < 0 {
            return Err(ExtractError::Corrupt(format!(
                "{} (libmpq error {ret})",
                describe(ret)
            )));
        }
        Ok(to_size(size))
    }
}
