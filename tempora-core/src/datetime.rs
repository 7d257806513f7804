//! Calendar timestamps with millisecond precision.
//!
//! A `DateTime` is canonically a signed count of milliseconds since
//! 1970-01-01T00:00:00.000. Calendar fields are computed on demand via
//! the proleptic Gregorian civil-from-days algorithm; they are never
//! stored. Valid over the whole proleptic range, no lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::timespan::{
    TimeSpan, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Unix epoch: 1970-01-01T00:00:00
const UNIX_EPOCH_DAYS: i64 = 719_468; // Days from year 0 to 1970-01-01

// ============================================================================
// DateTime
// ============================================================================

/// A fixed point on the proleptic Gregorian calendar.
///
/// Internally stores milliseconds since the Unix epoch (negative for
/// pre-1970 dates). There is no time zone; all values are civil time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DateTime {
    /// Milliseconds since Unix epoch
    millis: i64,
}

impl DateTime {
    /// Reserved out-of-band value meaning "invalid timestamp".
    ///
    /// Never produced by any construction or arithmetic on valid inputs;
    /// the FFI boundary returns it for failed parses and rejected fields.
    pub const INVALID_TIMESTAMP: i64 = -i64::MAX;

    // ========== Construction ==========

    /// Create from milliseconds since the Unix epoch. Any value is accepted.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Create a date (time = 00:00:00.000).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self::from_ymd_hms_milli(year, month, day, 0, 0, 0, 0)
    }

    /// Create a datetime from calendar fields, whole-second precision.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self::from_ymd_hms_milli(year, month, day, hour, minute, second, 0)
    }

    /// Create a datetime from calendar fields.
    ///
    /// Fields are not range-checked: out-of-range values fold through the
    /// civil-to-days arithmetic to a wrapped but well-defined date (month 13
    /// of one year is January of the next). Callers wanting strict
    /// validation parse instead, or check with [`days_in_month`].
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Self {
        let days = days_from_civil(year, month, day);
        let time_millis = (hour as i64) * MILLIS_PER_HOUR
            + (minute as i64) * MILLIS_PER_MINUTE
            + (second as i64) * MILLIS_PER_SECOND
            + (millisecond as i64);
        Self {
            millis: days * MILLIS_PER_DAY + time_millis,
        }
    }

    /// Current wall-clock time, truncated to milliseconds.
    pub fn now() -> Self {
        let duration = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            millis: duration.as_millis() as i64,
        }
    }

    // ========== Accessors ==========

    /// Milliseconds since the Unix epoch (the canonical representation).
    pub fn timestamp_millis(&self) -> i64 {
        self.millis
    }

    /// Decompose into year, month, day.
    pub fn to_ymd(&self) -> (i32, u32, u32) {
        // Floor, not truncate: pre-epoch instants belong to the prior day.
        let days = self.millis.div_euclid(MILLIS_PER_DAY);
        civil_from_days(days)
    }

    /// Year (signed; may be <= 0 for proleptic BCE dates).
    pub fn year(&self) -> i32 {
        let (y, _, _) = self.to_ymd();
        y
    }

    /// Month (1-12).
    pub fn month(&self) -> u32 {
        let (_, m, _) = self.to_ymd();
        m
    }

    /// Day of month (1-31).
    pub fn day(&self) -> u32 {
        let (_, _, d) = self.to_ymd();
        d
    }

    /// Hour (0-23).
    pub fn hour(&self) -> u32 {
        let day_millis = self.millis.rem_euclid(MILLIS_PER_DAY);
        (day_millis / MILLIS_PER_HOUR) as u32
    }

    /// Minute (0-59).
    pub fn minute(&self) -> u32 {
        let day_millis = self.millis.rem_euclid(MILLIS_PER_DAY);
        ((day_millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u32
    }

    /// Second (0-59).
    pub fn second(&self) -> u32 {
        let day_millis = self.millis.rem_euclid(MILLIS_PER_DAY);
        ((day_millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u32
    }

    /// Millisecond (0-999).
    pub fn millisecond(&self) -> u32 {
        self.millis.rem_euclid(MILLIS_PER_SECOND) as u32
    }

    /// Decompose into all calendar fields.
    pub fn to_components(&self) -> DateTimeComponents {
        let (year, month, day) = self.to_ymd();
        DateTimeComponents {
            year,
            month,
            day,
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            millisecond: self.millisecond(),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add<TimeSpan> for DateTime {
    type Output = DateTime;

    fn add(self, span: TimeSpan) -> DateTime {
        DateTime {
            millis: self.millis + span.total_milliseconds(),
        }
    }
}

impl Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    fn sub(self, span: TimeSpan) -> DateTime {
        DateTime {
            millis: self.millis - span.total_milliseconds(),
        }
    }
}

impl Sub for DateTime {
    type Output = TimeSpan;

    /// Signed difference; positive when `self` is later than `other`.
    fn sub(self, other: DateTime) -> TimeSpan {
        TimeSpan::from_milliseconds(self.millis - other.millis)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(crate::format::DEFAULT_FORMAT))
    }
}

// ============================================================================
// DateTimeComponents
// ============================================================================

/// Decomposed calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

// ============================================================================
// Calendar Utilities (Gregorian proleptic)
// ============================================================================

/// Check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month (0 for an out-of-range month)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        m if (1..=12).contains(&m) => DAYS_IN_MONTH[(m - 1) as usize],
        _ => 0,
    }
}

/// Convert civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Convert days since Unix epoch to civil date
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m, d)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_epoch() {
        let dt = DateTime::default();
        assert_eq!(dt.timestamp_millis(), 0);
        assert_eq!(dt.to_ymd(), (1970, 1, 1));
    }

    #[test]
    fn test_from_ymd() {
        let dt = DateTime::from_ymd(2025, 6, 15);
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_field_roundtrip() {
        let dt = DateTime::from_ymd_hms_milli(2022, 1, 31, 12, 34, 56, 789);
        assert_eq!(dt.year(), 2022);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.minute(), 34);
        assert_eq!(dt.second(), 56);
        assert_eq!(dt.millisecond(), 789);
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let dt = DateTime::from_ymd_hms_milli(2022, 1, 31, 12, 34, 56, 789);
        let again = DateTime::from_timestamp_millis(dt.timestamp_millis());
        assert_eq!(dt, again);
        assert_eq!(again.to_components(), dt.to_components());
    }

    #[test]
    fn test_pre_epoch() {
        let dt = DateTime::from_ymd(1969, 12, 31);
        assert!(dt.timestamp_millis() < 0);
        assert_eq!(dt.to_ymd(), (1969, 12, 31));

        // One millisecond before the epoch is the last instant of 1969.
        let dt = DateTime::from_timestamp_millis(-1);
        assert_eq!(dt.to_ymd(), (1969, 12, 31));
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.minute(), 59);
        assert_eq!(dt.second(), 59);
        assert_eq!(dt.millisecond(), 999);
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_unvalidated_fields_wrap() {
        // Month 13 of 2022 is January 2023.
        let dt = DateTime::from_ymd(2022, 13, 1);
        assert_eq!(dt.to_ymd(), (2023, 1, 1));

        // Hour 25 spills into the next day.
        let dt = DateTime::from_ymd_hms(2022, 1, 1, 25, 0, 0);
        assert_eq!(dt.to_ymd(), (2022, 1, 2));
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn test_add_sub_timespan() {
        let dt = DateTime::from_ymd_hms(2022, 1, 15, 12, 0, 0);

        let later = dt + TimeSpan::from_days(10);
        assert_eq!(later.to_ymd(), (2022, 1, 25));
        assert_eq!(later.hour(), 12);

        let next = dt + TimeSpan::from_hours(12);
        assert_eq!(next.day(), 16);
        assert_eq!(next.hour(), 0);

        let earlier = dt - TimeSpan::from_days(10);
        assert_eq!(earlier.to_ymd(), (2022, 1, 5));

        let prev = dt - TimeSpan::from_hours(13);
        assert_eq!(prev.day(), 14);
        assert_eq!(prev.hour(), 23);
    }

    #[test]
    fn test_difference() {
        let a = DateTime::from_ymd_hms(2022, 1, 15, 12, 0, 0);
        let b = DateTime::from_ymd_hms(2022, 1, 20, 18, 30, 0);

        let diff = b - a;
        assert_eq!(diff.total_days(), 5);
        assert_eq!(diff.total_hours(), 5 * 24 + 6);
        assert_eq!(diff.total_minutes(), (5 * 24 + 6) * 60 + 30);

        // Reversed operands flip the sign.
        assert_eq!((a - b).total_minutes(), -((5 * 24 + 6) * 60 + 30));
    }

    #[test]
    fn test_month_and_year_wrap() {
        let dt = DateTime::from_ymd(2022, 1, 31) + TimeSpan::from_days(1);
        assert_eq!(dt.to_ymd(), (2022, 2, 1));

        let dt = DateTime::from_ymd(2022, 12, 31) + TimeSpan::from_days(1);
        assert_eq!(dt.to_ymd(), (2023, 1, 1));
    }

    #[test]
    fn test_leap_day_boundary() {
        // 2020 was a leap year: Feb 29 + 366 days lands on 2021-03-01.
        let dt = DateTime::from_ymd(2020, 2, 29) + TimeSpan::from_days(366);
        assert_eq!(dt.to_ymd(), (2021, 3, 1));
    }

    #[test]
    fn test_extreme_dates() {
        let ancient = DateTime::from_ymd(1, 1, 1);
        let far_future = DateTime::from_ymd_hms_milli(9999, 12, 31, 23, 59, 59, 999);
        assert!(ancient < far_future);
        assert_eq!(ancient.to_ymd(), (1, 1, 1));
        assert_eq!(far_future.to_ymd(), (9999, 12, 31));
        assert_eq!(far_future.millisecond(), 999);

        // Proleptic BCE dates decompose too.
        let bce = DateTime::from_ymd(0, 1, 1);
        assert_eq!(bce.to_ymd(), (0, 1, 1));
    }

    #[test]
    fn test_comparisons() {
        let a = DateTime::from_ymd(2022, 1, 15);
        let b = DateTime::from_ymd(2022, 1, 20);
        let c = DateTime::from_ymd(2022, 1, 15);

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= c);
        assert!(a >= c);
    }

    #[test]
    fn test_now_is_recent() {
        let now = DateTime::now();
        let std_millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64;
        assert!((now.timestamp_millis() - std_millis).abs() < 5000);
        assert!(now.year() >= 2022);
    }

    #[test]
    fn test_sentinel_out_of_band() {
        // The sentinel is not the timestamp of any round-trippable date the
        // library can construct from fields; it is reserved for the boundary.
        assert_eq!(DateTime::INVALID_TIMESTAMP, -i64::MAX);
        assert!(DateTime::INVALID_TIMESTAMP < DateTime::from_ymd(1, 1, 1).timestamp_millis());
    }
}
