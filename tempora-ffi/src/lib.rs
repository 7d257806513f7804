//! C FFI layer for Tempora: flat time primitives for Fortran hosts.
//!
//! Every TimeSpan/DateTime factory, accessor, arithmetic operator,
//! comparison, formatter, and parser is exposed as an `extern "C"`
//! function over plain `i64` values: durations travel as their total
//! milliseconds, timestamps as milliseconds since the Unix epoch, so
//! marshaling costs nothing beyond the integer itself.
//!
//! Boundary rules:
//! - Failed parses and rejected field constructions return
//!   [`TEMPORA_INVALID_TIMESTAMP`].
//! - Inbound strings are (pointer, length) pairs; the host's character
//!   values are not NUL-terminated.
//! - Outbound strings are written into caller buffers, always
//!   NUL-terminated, silently truncated when too small.
//! - Negative calendar-field inputs are rejected here, before they reach
//!   the core; the core itself stays precondition-based.
//! - No panic unwinds across the boundary.
//!
//! Enable logging with: RUST_LOG=tempora_ffi=debug

mod datetime;
mod timespan;
mod util;

pub use datetime::*;
pub use timespan::*;

/// Reserved i64 meaning "invalid timestamp": failed parse or rejected
/// field construction. Never collides with a legitimate timestamp.
pub const TEMPORA_INVALID_TIMESTAMP: i64 = tempora_core::DateTime::INVALID_TIMESTAMP;

/// Catches any panic and returns a fallback value instead of unwinding across FFI.
macro_rules! catch_panic {
    ($default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(result) => result,
            Err(_) => $default,
        }
    }};
}
pub(crate) use catch_panic;

/// Returns the tempora-ffi ABI version (semver-encoded: major*10000 + minor*100 + patch).
#[allow(clippy::erasing_op, clippy::identity_op)]
#[no_mangle]
pub extern "C" fn tempora_abi_version() -> u32 {
    0 * 10000 + 1 * 100 + 0 // 0.1.0
}

/// Constant getter for hosts that cannot read exported constants.
#[no_mangle]
pub extern "C" fn tempora_invalid_timestamp() -> i64 {
    TEMPORA_INVALID_TIMESTAMP
}

/// Install a stderr tracing subscriber. Safe to call more than once;
/// later calls are no-ops.
#[no_mangle]
pub extern "C" fn tempora_tracing_init() {
    let _ = tracing_subscriber::fmt().try_init();
}
