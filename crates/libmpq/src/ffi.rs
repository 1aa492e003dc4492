//! Raw declarations for the system libmpq library (mpq.h).

#![allow(non_camel_case_types)]

use libc::c_char;

/// Opaque archive handle allocated and freed by libmpq.
#[repr(C)]
pub struct mpq_archive_s {
    _private: [u8; 0],
}

/// libmpq's offset/size type (a signed 64-bit `long long`).
pub type libmpq__off_t = i64;

pub const LIBMPQ_ERROR_OPEN: i32 = -1;
pub const LIBMPQ_ERROR_CLOSE: i32 = -2;
pub const LIBMPQ_ERROR_SEEK: i32 = -3;
pub const LIBMPQ_ERROR_READ: i32 = -4;
pub const LIBMPQ_ERROR_WRITE: i32 = -5;
pub const LIBMPQ_ERROR_MALLOC: i32 = -6;
pub const LIBMPQ_ERROR_FORMAT: i32 = -7;
pub const LIBMPQ_ERROR_NOT_INITIALIZED: i32 = -8;
pub const LIBMPQ_ERROR_SIZE: i32 = -9;
pub const LIBMPQ_ERROR_EXIST: i32 = -10;
pub const LIBMPQ_ERROR_DECRYPT: i32 = -11;
pub const LIBMPQ_ERROR_UNPACK: i32 = -12;

unsafe extern "C" {
    pub fn libmpq__version() -> *const c_char;

    pub fn libmpq__archive_open(
        mpq_archive: *mut *mut mpq_archive_s,
        mpq_filename: *const c_char,
        archive_offset: libmpq__off_t,
    ) -> i32;
    pub fn libmpq__archive_close(mpq_archive: *mut mpq_archive_s) -> i32;
    pub fn libmpq__archive_size_packed(
        mpq_archive: *mut mpq_archive_s,
        packed_size: *mut libmpq__off_t,
    ) -> i32;
    pub fn libmpq__archive_size_unpacked(
        mpq_archive: *mut mpq_archive_s,
        unpacked_size: *mut libmpq__off_t,
    ) -> i32;
    pub fn libmpq__archive_files(mpq_archive: *mut mpq_archive_s, files: *mut u32) -> i32;

    pub fn libmpq__file_size_packed(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        packed_size: *mut libmpq__off_t,
    ) -> i32;
    pub fn libmpq__file_size_unpacked(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        unpacked_size: *mut libmpq__off_t,
    ) -> i32;
    pub fn libmpq__file_encrypted(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        encrypted: *mut u32,
    ) -> i32;
    pub fn libmpq__file_compressed(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        compressed: *mut u32,
    ) -> i32;
    pub fn libmpq__file_imploded(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        imploded: *mut u32,
    ) -> i32;
    pub fn libmpq__file_number(
        mpq_archive: *mut mpq_archive_s,
        filename: *const c_char,
        number: *mut u32,
    ) -> i32;
    pub fn libmpq__file_read(
        mpq_archive: *mut mpq_archive_s,
        file_number: u32,
        out_buf: *mut u8,
        out_size: libmpq__off_t,
        transferred: *mut libmpq__off_t,
    ) -> i32;
}
