//! TimeSpan functions. Durations cross the boundary as total milliseconds.

use std::ffi::c_char;

use tempora_core::TimeSpan;
use tracing::warn;

use crate::catch_panic;
use crate::util::write_str;

// ============================================================================
// Factories
// ============================================================================

/// Create a TimeSpan from days, hours, minutes, seconds, and milliseconds.
/// Components may independently be out of their natural range.
#[no_mangle]
pub extern "C" fn tempora_timespan_new(
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
) -> i64 {
    catch_panic!(
        0,
        TimeSpan::new(days, hours, minutes, seconds, milliseconds).total_milliseconds()
    )
}

#[no_mangle]
pub extern "C" fn tempora_timespan_from_days(days: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_days(days).total_milliseconds())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_from_hours(hours: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_hours(hours).total_milliseconds())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_from_minutes(minutes: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_minutes(minutes).total_milliseconds())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_from_seconds(seconds: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_seconds(seconds).total_milliseconds())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_from_milliseconds(milliseconds: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_milliseconds(milliseconds).total_milliseconds())
}

// ============================================================================
// Component accessors (sign-matched, bounded by their natural modulus)
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_timespan_days(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::to_components(ts_ms).days)
}

#[no_mangle]
pub extern "C" fn tempora_timespan_hours(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::to_components(ts_ms).hours)
}

#[no_mangle]
pub extern "C" fn tempora_timespan_minutes(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::to_components(ts_ms).minutes)
}

#[no_mangle]
pub extern "C" fn tempora_timespan_seconds(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::to_components(ts_ms).seconds)
}

#[no_mangle]
pub extern "C" fn tempora_timespan_milliseconds(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::to_components(ts_ms).milliseconds)
}

// ============================================================================
// Totals (entire duration truncated toward zero)
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_timespan_total_days(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_milliseconds(ts_ms).total_days())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_total_hours(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_milliseconds(ts_ms).total_hours())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_total_minutes(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_milliseconds(ts_ms).total_minutes())
}

#[no_mangle]
pub extern "C" fn tempora_timespan_total_seconds(ts_ms: i64) -> i64 {
    catch_panic!(0, TimeSpan::from_milliseconds(ts_ms).total_seconds())
}

// ============================================================================
// Arithmetic
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_timespan_add(ts1_ms: i64, ts2_ms: i64) -> i64 {
    catch_panic!(
        0,
        (TimeSpan::from_milliseconds(ts1_ms) + TimeSpan::from_milliseconds(ts2_ms))
            .total_milliseconds()
    )
}

#[no_mangle]
pub extern "C" fn tempora_timespan_subtract(ts1_ms: i64, ts2_ms: i64) -> i64 {
    catch_panic!(
        0,
        (TimeSpan::from_milliseconds(ts1_ms) - TimeSpan::from_milliseconds(ts2_ms))
            .total_milliseconds()
    )
}

#[no_mangle]
pub extern "C" fn tempora_timespan_multiply(ts_ms: i64, factor: i64) -> i64 {
    catch_panic!(0, (TimeSpan::from_milliseconds(ts_ms) * factor).total_milliseconds())
}

/// Divide a TimeSpan by an integer divisor, truncating toward zero.
/// A zero divisor is rejected here and yields a zero duration.
#[no_mangle]
pub extern "C" fn tempora_timespan_divide(ts_ms: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        warn!(ts_ms, "timespan division by zero rejected");
        return 0;
    }
    catch_panic!(0, (TimeSpan::from_milliseconds(ts_ms) / divisor).total_milliseconds())
}

// ============================================================================
// Comparisons
// ============================================================================

#[no_mangle]
pub extern "C" fn tempora_timespan_equals(ts1_ms: i64, ts2_ms: i64) -> bool {
    ts1_ms == ts2_ms
}

#[no_mangle]
pub extern "C" fn tempora_timespan_less_than(ts1_ms: i64, ts2_ms: i64) -> bool {
    ts1_ms < ts2_ms
}

#[no_mangle]
pub extern "C" fn tempora_timespan_greater_than(ts1_ms: i64, ts2_ms: i64) -> bool {
    ts1_ms > ts2_ms
}

#[no_mangle]
pub extern "C" fn tempora_timespan_less_equal(ts1_ms: i64, ts2_ms: i64) -> bool {
    ts1_ms <= ts2_ms
}

#[no_mangle]
pub extern "C" fn tempora_timespan_greater_equal(ts1_ms: i64, ts2_ms: i64) -> bool {
    ts1_ms >= ts2_ms
}

// ============================================================================
// Rendering
// ============================================================================

/// Write the `[{days}d ]{HH}:{MM}:{SS}[.{mmm}]` rendering into the
/// caller's buffer.
///
/// # Safety
///
/// `buffer` must be valid for writes of `buffer_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn tempora_timespan_to_string(ts_ms: i64, buffer: *mut c_char, buffer_len: i32) {
    catch_panic!(
        (),
        write_str(&TimeSpan::from_milliseconds(ts_ms).to_string(), buffer, buffer_len)
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn to_string(ts_ms: i64, buf_len: i32) -> String {
        let mut buf = vec![0u8; buf_len as usize];
        unsafe { tempora_timespan_to_string(ts_ms, buf.as_mut_ptr() as *mut c_char, buf_len) };
        CStr::from_bytes_until_nul(&buf).unwrap().to_str().unwrap().to_string()
    }

    #[test]
    fn test_new_matches_weighted_sum() {
        let ms = tempora_timespan_new(1, 2, 3, 4, 5);
        assert_eq!(ms, 86_400_000 + 2 * 3_600_000 + 3 * 60_000 + 4_000 + 5);
    }

    #[test]
    fn test_factories_and_components() {
        let ms = tempora_timespan_from_hours(25);
        assert_eq!(tempora_timespan_days(ms), 1);
        assert_eq!(tempora_timespan_hours(ms), 1);
        assert_eq!(tempora_timespan_total_hours(ms), 25);

        assert_eq!(tempora_timespan_from_days(2), 2 * 86_400_000);
        assert_eq!(tempora_timespan_from_minutes(60), 3_600_000);
        assert_eq!(tempora_timespan_from_seconds(60), 60_000);
        assert_eq!(tempora_timespan_from_milliseconds(1234), 1234);
    }

    #[test]
    fn test_negative_components() {
        let ms = tempora_timespan_from_days(-1);
        assert_eq!(tempora_timespan_days(ms), -1);
        assert_eq!(tempora_timespan_total_hours(ms), -24);
        assert_eq!(tempora_timespan_milliseconds(ms), 0);
    }

    #[test]
    fn test_arithmetic() {
        let day = tempora_timespan_from_days(1);
        let half = tempora_timespan_from_hours(12);
        assert_eq!(tempora_timespan_total_hours(tempora_timespan_add(day, half)), 36);
        assert_eq!(tempora_timespan_total_hours(tempora_timespan_subtract(day, half)), 12);
        assert_eq!(tempora_timespan_total_hours(tempora_timespan_multiply(half, 3)), 36);
        assert_eq!(tempora_timespan_total_hours(tempora_timespan_divide(day, 2)), 12);
    }

    #[test]
    fn test_divide_by_zero_guard() {
        assert_eq!(tempora_timespan_divide(tempora_timespan_from_days(1), 0), 0);
    }

    #[test]
    fn test_comparisons() {
        let one = tempora_timespan_from_hours(1);
        let two = tempora_timespan_from_hours(2);
        assert!(tempora_timespan_equals(one, one));
        assert!(tempora_timespan_less_than(one, two));
        assert!(tempora_timespan_greater_than(two, one));
        assert!(tempora_timespan_less_equal(one, one));
        assert!(tempora_timespan_greater_equal(two, one));
        assert!(!tempora_timespan_less_than(two, one));
    }

    #[test]
    fn test_to_string() {
        let ms = tempora_timespan_new(1, 2, 3, 4, 5);
        assert_eq!(to_string(ms, 64), "1d 02:03:04.005");
    }

    #[test]
    fn test_to_string_truncates() {
        let ms = tempora_timespan_new(1, 2, 3, 4, 5);
        assert_eq!(to_string(ms, 4), "1d ");
    }
}
