//! Tempora Core - Fundamental time values
//!
//! This crate provides the two value types used throughout Tempora:
//! - `TimeSpan`: a signed duration with millisecond precision
//! - `DateTime`: a proleptic-Gregorian timestamp with millisecond precision
//!
//! Design principles:
//! - No external datetime crates (keeps tempora-core minimal)
//! - Canonical representation is a single signed i64 millisecond count
//! - Calendar fields are derived on demand, never stored
//! - Construction from fields never validates; parsing always does

mod datetime;
mod format;
mod timespan;

pub use datetime::{days_in_month, is_leap_year, DateTime, DateTimeComponents};
pub use format::{ParseError, DEFAULT_FORMAT};
pub use timespan::{
    TimeSpan, TimeSpanComponents, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
    MILLIS_PER_SECOND,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DateTime, ParseError, TimeSpan, TimeSpanComponents};
}
