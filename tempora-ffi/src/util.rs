//! Helpers for moving strings across the boundary.

use std::ffi::c_char;

use tracing::warn;

/// Copy `s` into the caller's buffer, always NUL-terminating and silently
/// truncating if the rendered string does not fit.
///
/// # Safety
///
/// `buffer` must be valid for writes of `buffer_len` bytes.
pub(crate) unsafe fn write_str(s: &str, buffer: *mut c_char, buffer_len: i32) {
    if buffer.is_null() || buffer_len <= 0 {
        warn!(buffer_len, "refusing to write into an unusable output buffer");
        return;
    }
    let capacity = (buffer_len - 1) as usize;
    let bytes = s.as_bytes();
    let n = bytes.len().min(capacity);
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer as *mut u8, n);
    *buffer.add(n) = 0;
}

/// Borrow an inbound (pointer, length) host string as UTF-8.
///
/// The host's character values carry no NUL terminator, so the length is
/// authoritative. Returns `None` for null pointers, non-positive lengths,
/// and invalid UTF-8.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes for the duration of the
/// call.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char, len: i32) -> Option<&'a str> {
    if ptr.is_null() || len <= 0 {
        return None;
    }
    let bytes = std::slice::from_raw_parts(ptr as *const u8, len as usize);
    std::str::from_utf8(bytes).ok()
}
