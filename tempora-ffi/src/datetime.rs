//! DateTime functions. Timestamps cross the boundary as milliseconds
//! since the Unix epoch; the sentinel marks failures.

use std::ffi::c_char;

use tempora_core::{DateTime, TimeSpan};
use tracing::{debug, warn};

use crate::catch_panic;
use crate::util::{read_str, write_str};
use crate::TEMPORA_INVALID_TIMESTAMP;

/// Host integers stand in for unsigned calendar fields; negatives (and
/// values past u32) are rejected before they reach the core.
fn calendar_field(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

// ============================================================================
// Factories
// ============================================================================

/// Create a DateTime from calendar fields.
///
/// Any negative field yields the invalid-timestamp sentinel. Fields that
/// are non-negative but out of natural range wrap arithmetically, as the
/// core documents.
#[no_mangle]
pub extern "C" fn tempora_datetime_new(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> i64 {
    let year = match i32::try_from(year) {
        Ok(y) if y >= 0 => y,
        _ => return TEMPORA_INVALID_TIMESTAMP,
    };
    let fields = (
        calendar_field(month),
        calendar_field(day),
        calendar_field(hour),
        calendar_field(minute),
        calendar_field(second),
        calendar_field(millisecond),
    );
    let (Some(month), Some(day), Some(hour), Some(minute), Some(second), Some(millisecond)) =
        fields
    else {
        return TEMPORA_INVALID_TIMESTAMP;
    };
    catch_panic!(
        TEMPORA_INVALID_TIMESTAMP,
        DateTime::from_ymd_hms_milli(year, month, day, hour, minute, second, millisecond)
            .timestamp_millis()
    )
}

/// Current wall-clock time, truncated to milliseconds.
#[no_mangle]
pub extern "C" fn tempora_datetime_now() -> i64 {
    catch_panic!(TEMPORA_INVALID_TIMESTAMP, DateTime::now().timestamp_millis())
}

/// Parse a host string against a host format string.
///
/// Both strings arrive as (pointer, length) pairs. Any parse failure
/// (bad pointers, bad lengths, malformed input, impossible dates) yields
/// the invalid-timestamp sentinel.
///
/// # Safety
///
/// `str_ptr` and `format_ptr` must be valid for reads of `str_len` and
/// `format_len` bytes respectively.
#[no_mangle]
pub unsafe extern "C" fn tempora_datetime_parse(
    str_ptr: *const c_char,
    str_len: i32,
    format_ptr: *const c_char,
    format_len: i32,
) -> i64 {
    catch_panic!(TEMPORA_INVALID_TIMESTAMP, {
        match (read_str(str_ptr, str_len), read_str(format_ptr, format_len)) {
            (Some(input), Some(fmt)) => match DateTime::parse_with_format(input, fmt) {
                Ok(dt) => dt.timestamp_millis(),
                Err(err) => {
                    debug!(%err, "datetime parse failed");
                    TEMPORA_INVALID_TIMESTAMP
                }
            },
            _ => TEMPORA_INVALID_TIMESTAMP,
        }
    })
}

// ============================================================================
// Calendar field accessors
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_datetime_year(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).year() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_month(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).month() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_day(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).day() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_hour(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).hour() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_minute(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).minute() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_second(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).second() as i64)
}

#[no_mangle]
pub extern "C" fn tempora_datetime_millisecond(dt_ms: i64) -> i64 {
    catch_panic!(0, DateTime::from_timestamp_millis(dt_ms).millisecond() as i64)
}

// ============================================================================
// Arithmetic
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_datetime_add_timespan(dt_ms: i64, ts_ms: i64) -> i64 {
    catch_panic!(
        TEMPORA_INVALID_TIMESTAMP,
        (DateTime::from_timestamp_millis(dt_ms) + TimeSpan::from_milliseconds(ts_ms))
            .timestamp_millis()
    )
}

#[no_mangle]
pub extern "C" fn tempora_datetime_subtract_timespan(dt_ms: i64, ts_ms: i64) -> i64 {
    catch_panic!(
        TEMPORA_INVALID_TIMESTAMP,
        (DateTime::from_timestamp_millis(dt_ms) - TimeSpan::from_milliseconds(ts_ms))
            .timestamp_millis()
    )
}

/// Difference between two DateTimes as a TimeSpan; positive when the
/// first operand is later.
#[no_mangle]
pub extern "C" fn tempora_datetime_difference(dt1_ms: i64, dt2_ms: i64) -> i64 {
    catch_panic!(
        0,
        (DateTime::from_timestamp_millis(dt1_ms) - DateTime::from_timestamp_millis(dt2_ms))
            .total_milliseconds()
    )
}

// ============================================================================
// Comparisons
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_datetime_equals(dt1_ms: i64, dt2_ms: i64) -> bool {
    dt1_ms == dt2_ms
}

#[no_mangle]
pub extern "C" fn tempora_datetime_less_than(dt1_ms: i64, dt2_ms: i64) -> bool {
    dt1_ms < dt2_ms
}

#[no_mangle]
pub extern "C" fn tempora_datetime_greater_than(dt1_ms: i64, dt2_ms: i64) -> bool {
    dt1_ms > dt2_ms
}

#[no_mangle]
pub extern "C" fn tempora_datetime_less_equal(dt1_ms: i64, dt2_ms: i64) -> bool {
    dt1_ms <= dt2_ms
}

#[no_mangle]
pub extern "C" fn tempora_datetime_greater_equal(dt1_ms: i64, dt2_ms: i64) -> bool {
    dt1_ms >= dt2_ms
}

// ============================================================================
// Rendering
// ============================================================================

/// Render with whole-second precision into the caller's buffer.
///
/// # Safety
///
/// `format_ptr` must be valid for reads of `format_len` bytes; `buffer`
/// must be valid for writes of `buffer_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn tempora_datetime_format(
    dt_ms: i64,
    format_ptr: *const c_char,
    format_len: i32,
    buffer: *mut c_char,
    buffer_len: i32,
) {
    catch_panic!((), {
        match read_str(format_ptr, format_len) {
            Some(fmt) => {
                write_str(&DateTime::from_timestamp_millis(dt_ms).format(fmt), buffer, buffer_len)
            }
            None => warn!(format_len, "invalid format string for datetime_format"),
        }
    })
}

/// Render with `%S` carrying the millisecond suffix.
///
/// # Safety
///
/// Same contract as [`tempora_datetime_format`].
#[no_mangle]
pub unsafe extern "C" fn tempora_datetime_format_milliseconds(
    dt_ms: i64,
    format_ptr: *const c_char,
    format_len: i32,
    buffer: *mut c_char,
    buffer_len: i32,
) {
    catch_panic!((), {
        match read_str(format_ptr, format_len) {
            Some(fmt) => write_str(
                &DateTime::from_timestamp_millis(dt_ms).format_with_millis(fmt),
                buffer,
                buffer_len,
            ),
            None => warn!(format_len, "invalid format string for datetime_format_milliseconds"),
        }
    })
}

/// Write the ISO 8601 whole-second rendering into the caller's buffer.
///
/// # Safety
///
/// `buffer` must be valid for writes of `buffer_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn tempora_datetime_to_iso_string(dt_ms: i64, buffer: *mut c_char, buffer_len: i32) {
    catch_panic!(
        (),
        write_str(&DateTime::from_timestamp_millis(dt_ms).to_iso_string(), buffer, buffer_len)
    )
}

/// Write the ISO 8601 millisecond rendering into the caller's buffer.
///
/// # Safety
///
/// `buffer` must be valid for writes of `buffer_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn tempora_datetime_to_iso_string_milliseconds(
    dt_ms: i64,
    buffer: *mut c_char,
    buffer_len: i32,
) {
    catch_panic!(
        (),
        write_str(
            &DateTime::from_timestamp_millis(dt_ms).to_iso_string_millis(),
            buffer,
            buffer_len,
        )
    )
}

// ============================================================================
// Tests
// ============================================================================
