//! Signed millisecond durations.
//!
//! A `TimeSpan` is canonically a single signed count of milliseconds.
//! Component views (days, hours, minutes, seconds, milliseconds) are
//! derived on demand and are never stored; every non-zero component
//! carries the sign of the whole duration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ============================================================================
// Constants
// ============================================================================

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

// ============================================================================
// TimeSpanComponents
// ============================================================================

/// Decomposed duration components.
///
/// Recomposing (`days`*86,400,000 + `hours`*3,600,000 + `minutes`*60,000 +
/// `seconds`*1,000 + `milliseconds`) reproduces the original duration
/// exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpanComponents {
    pub days: i64,
    /// Hours component (-23..=23)
    pub hours: i64,
    /// Minutes component (-59..=59)
    pub minutes: i64,
    /// Seconds component (-59..=59)
    pub seconds: i64,
    /// Milliseconds component (-999..=999)
    pub milliseconds: i64,
}

impl TimeSpanComponents {
    /// Weighted sum of all components, in milliseconds.
    pub fn total_milliseconds(&self) -> i64 {
        self.days * MILLIS_PER_DAY
            + self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
            + self.milliseconds
    }
}

// ============================================================================
// TimeSpan
// ============================================================================

/// A signed duration with millisecond precision.
///
/// Can be positive (forward) or negative (backward).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSpan {
    /// Signed milliseconds
    millis: i64,
}

impl TimeSpan {
    /// Zero-length duration.
    pub const ZERO: TimeSpan = TimeSpan { millis: 0 };

    // ========== Construction ==========

    /// Create from days, hours, minutes, seconds, and milliseconds.
    ///
    /// Each component may independently be out of its natural range;
    /// `new(0, 30, 0, 0, 0)` folds into one day and six hours.
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Self {
            millis: days * MILLIS_PER_DAY
                + hours * MILLIS_PER_HOUR
                + minutes * MILLIS_PER_MINUTE
                + seconds * MILLIS_PER_SECOND
                + milliseconds,
        }
    }

    /// Create from a components struct.
    pub fn from_components(components: TimeSpanComponents) -> Self {
        Self {
            millis: components.total_milliseconds(),
        }
    }

    /// Create from whole days.
    pub fn from_days(days: i64) -> Self {
        Self {
            millis: days * MILLIS_PER_DAY,
        }
    }

    /// Create from whole hours.
    pub fn from_hours(hours: i64) -> Self {
        Self {
            millis: hours * MILLIS_PER_HOUR,
        }
    }

    /// Create from whole minutes.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            millis: minutes * MILLIS_PER_MINUTE,
        }
    }

    /// Create from whole seconds.
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            millis: seconds * MILLIS_PER_SECOND,
        }
    }

    /// Create from milliseconds.
    pub fn from_milliseconds(milliseconds: i64) -> Self {
        Self {
            millis: milliseconds,
        }
    }

    // ========== Decomposition ==========

    /// Break a millisecond count into sign-matched components.
    ///
    /// Decomposition runs on the absolute value, largest unit first, then
    /// the sign is reapplied uniformly to every component.
    pub fn to_components(millis: i64) -> TimeSpanComponents {
        let negative = millis < 0;
        // Widen so that i64::MIN has a representable absolute value.
        let mut rem = (millis as i128).abs();

        let days = rem / MILLIS_PER_DAY as i128;
        rem -= days * MILLIS_PER_DAY as i128;
        let hours = rem / MILLIS_PER_HOUR as i128;
        rem -= hours * MILLIS_PER_HOUR as i128;
        let minutes = rem / MILLIS_PER_MINUTE as i128;
        rem -= minutes * MILLIS_PER_MINUTE as i128;
        let seconds = rem / MILLIS_PER_SECOND as i128;
        rem -= seconds * MILLIS_PER_SECOND as i128;
        let milliseconds = rem;
        rem -= milliseconds;
        debug_assert_eq!(rem, 0, "decomposition remainder must reduce to zero");

        let mut components = TimeSpanComponents {
            days: days as i64,
            hours: hours as i64,
            minutes: minutes as i64,
            seconds: seconds as i64,
            milliseconds: milliseconds as i64,
        };
        if negative {
            components.days = -components.days;
            components.hours = -components.hours;
            components.minutes = -components.minutes;
            components.seconds = -components.seconds;
            components.milliseconds = -components.milliseconds;
        }
        components
    }

    /// Decompose this duration into components.
    pub fn components(&self) -> TimeSpanComponents {
        Self::to_components(self.millis)
    }

    // ========== Component accessors ==========

    /// Days component.
    pub fn days(&self) -> i64 {
        self.components().days
    }

    /// Hours component (-23..=23).
    pub fn hours(&self) -> i64 {
        self.components().hours
    }

    /// Minutes component (-59..=59).
    pub fn minutes(&self) -> i64 {
        self.components().minutes
    }

    /// Seconds component (-59..=59).
    pub fn seconds(&self) -> i64 {
        self.components().seconds
    }

    /// Milliseconds component (-999..=999).
    pub fn milliseconds(&self) -> i64 {
        self.components().milliseconds
    }

    // ========== Totals (truncated toward zero) ==========

    /// Entire duration in whole days.
    pub fn total_days(&self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    /// Entire duration in whole hours.
    pub fn total_hours(&self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// Entire duration in whole minutes.
    pub fn total_minutes(&self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    /// Entire duration in whole seconds.
    pub fn total_seconds(&self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// Entire duration in milliseconds (the canonical representation).
    pub fn total_milliseconds(&self) -> i64 {
        self.millis
    }

    // ========== Predicates ==========

    /// Check if zero.
    pub fn is_zero(&self) -> bool {
        self.millis == 0
    }

    /// Check if negative.
    pub fn is_negative(&self) -> bool {
        self.millis < 0
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            millis: self.millis.abs(),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add for TimeSpan {
    type Output = TimeSpan;

    fn add(self, other: TimeSpan) -> TimeSpan {
        TimeSpan {
            millis: self.millis + other.millis,
        }
    }
}

impl Sub for TimeSpan {
    type Output = TimeSpan;

    fn sub(self, other: TimeSpan) -> TimeSpan {
        TimeSpan {
            millis: self.millis - other.millis,
        }
    }
}

impl Mul<i64> for TimeSpan {
    type Output = TimeSpan;

    fn mul(self, factor: i64) -> TimeSpan {
        TimeSpan {
            millis: self.millis * factor,
        }
    }
}

impl Div<i64> for TimeSpan {
    type Output = TimeSpan;

    /// Scale down by an integer divisor, truncating toward zero.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero. Callers are expected to guard the
    /// divisor; the FFI boundary does.
    fn div(self, divisor: i64) -> TimeSpan {
        TimeSpan {
            millis: self.millis / divisor,
        }
    }
}

impl Neg for TimeSpan {
    type Output = TimeSpan;

    fn neg(self) -> TimeSpan {
        TimeSpan {
            millis: -self.millis,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for TimeSpan {
    /// Renders `[{days}d ]{HH}:{MM}:{SS}[.{mmm}]` from the per-unit
    /// components; negative durations get a single leading sign.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs_millis = (self.millis as i128).abs();
        let sign = if self.millis < 0 { "-" } else { "" };

        let days = abs_millis / MILLIS_PER_DAY as i128;
        let hours = (abs_millis % MILLIS_PER_DAY as i128) / MILLIS_PER_HOUR as i128;
        let minutes = (abs_millis % MILLIS_PER_HOUR as i128) / MILLIS_PER_MINUTE as i128;
        let seconds = (abs_millis % MILLIS_PER_MINUTE as i128) / MILLIS_PER_SECOND as i128;
        let milliseconds = abs_millis % MILLIS_PER_SECOND as i128;

        if days != 0 {
            write!(f, "{}{}d {:02}:{:02}:{:02}", sign, days, hours, minutes, seconds)?;
        } else {
            write!(f, "{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)?;
        }
        if milliseconds != 0 {
            write!(f, ".{:03}", milliseconds)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
