//! Format-directed rendering and parsing of calendar timestamps.
//!
//! Implements the strftime-style subset the library commits to: `%Y`,
//! `%m`, `%d`, `%H`, `%M`, `%S`, and `%%`. Rendering copies unknown
//! specifiers through verbatim; parsing rejects them. Parsing is strict:
//! literals must match byte for byte, numeric fields are fixed width,
//! and trailing input is an error.

use thiserror::Error;

use crate::datetime::{days_in_month, DateTime, DateTimeComponents};

/// Format used by `DateTime::parse` and the `Display` impl.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO 8601 without a zone designator.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error type for timestamp parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unsupported format specifier %{0}")]
    UnsupportedSpecifier(char),

    #[error("format string ends with a bare %")]
    TruncatedSpecifier,

    #[error("expected {expected:?} at byte {at}")]
    LiteralMismatch { expected: char, at: usize },

    #[error("invalid {field} digits")]
    InvalidNumber { field: &'static str },

    #[error("{field} {value} is not a valid calendar value")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("input ended before the format was satisfied")]
    UnexpectedEnd,

    #[error("trailing input after the format: {0:?}")]
    TrailingInput(String),
}

// ============================================================================
// DateTime formatting / parsing surface
// ============================================================================

impl DateTime {
    /// Render with whole-second precision.
    pub fn format(&self, fmt: &str) -> String {
        render(&self.to_components(), fmt, false)
    }

    /// Render like [`DateTime::format`], except `%S` carries the full
    /// sub-second value as `SS.mmm`.
    pub fn format_with_millis(&self, fmt: &str) -> String {
        render(&self.to_components(), fmt, true)
    }

    /// ISO 8601, whole seconds: `2022-01-31T12:34:56`.
    pub fn to_iso_string(&self) -> String {
        self.format(ISO_FORMAT)
    }

    /// ISO 8601 with milliseconds: `2022-01-31T12:34:56.789`.
    pub fn to_iso_string_millis(&self) -> String {
        self.format_with_millis(ISO_FORMAT)
    }

    /// Parse against [`DEFAULT_FORMAT`].
    pub fn parse(input: &str) -> Result<DateTime, ParseError> {
        Self::parse_with_format(input, DEFAULT_FORMAT)
    }

    /// Parse against an explicit format.
    ///
    /// If the fourth byte from the end of the input is a period the `%S`
    /// field also consumes a `.mmm` millisecond suffix; otherwise
    /// milliseconds are zero. Fields the format does not mention default
    /// to the epoch value (1970-01-01 00:00:00.000). Calendar-impossible
    /// field values are parse errors; the unvalidated field constructors
    /// stay available for callers that want arithmetic wrapping instead.
    pub fn parse_with_format(input: &str, fmt: &str) -> Result<DateTime, ParseError> {
        parse(input, fmt)
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(c: &DateTimeComponents, fmt: &str, with_millis: bool) -> String {
    let mut out = String::with_capacity(fmt.len() + 8);
    let mut chars = fmt.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('Y') => out.push_str(&format!("{:04}", c.year)),
            Some('m') => out.push_str(&format!("{:02}", c.month)),
            Some('d') => out.push_str(&format!("{:02}", c.day)),
            Some('H') => out.push_str(&format!("{:02}", c.hour)),
            Some('M') => out.push_str(&format!("{:02}", c.minute)),
            Some('S') => {
                out.push_str(&format!("{:02}", c.second));
                if with_millis {
                    out.push_str(&format!(".{:03}", c.millisecond));
                }
            }
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

// ============================================================================
// Parsing
// ============================================================================

fn parse(input: &str, fmt: &str) -> Result<DateTime, ParseError> {
    let src = input.as_bytes();
    let with_millis = src.len() >= 4 && src[src.len() - 4] == b'.';

    let mut year: i64 = 1970;
    let mut month: i64 = 1;
    let mut day: i64 = 1;
    let mut hour: i64 = 0;
    let mut minute: i64 = 0;
    let mut second: i64 = 0;
    let mut millisecond: i64 = 0;

    let fb = fmt.as_bytes();
    let mut f = 0;
    let mut pos = 0;
    while f < fb.len() {
        if fb[f] != b'%' {
            expect_literal(src, &mut pos, fb[f])?;
            f += 1;
            continue;
        }
        let code = *fb.get(f + 1).ok_or(ParseError::TruncatedSpecifier)?;
        f += 2;
        match code {
            b'Y' => year = take_year(src, &mut pos)?,
            b'm' => month = take_two_digits(src, &mut pos, "month")?,
            b'd' => day = take_two_digits(src, &mut pos, "day")?,
            b'H' => hour = take_two_digits(src, &mut pos, "hour")?,
            b'M' => minute = take_two_digits(src, &mut pos, "minute")?,
            b'S' => {
                second = take_two_digits(src, &mut pos, "second")?;
                if with_millis {
                    expect_literal(src, &mut pos, b'.')?;
                    millisecond = take_fixed_digits(src, &mut pos, 3, "millisecond")?;
                }
            }
            b'%' => expect_literal(src, &mut pos, b'%')?,
            other => return Err(ParseError::UnsupportedSpecifier(other as char)),
        }
    }

    if pos != src.len() {
        let rest = String::from_utf8_lossy(&src[pos..]).into_owned();
        return Err(ParseError::TrailingInput(rest));
    }

    // A string that names an impossible date is a failed parse, even though
    // the field constructors themselves accept and wrap such values.
    if !(1..=12).contains(&month) {
        return Err(ParseError::OutOfRange { field: "month", value: month });
    }
    let max_day = days_in_month(year as i32, month as u32) as i64;
    if !(1..=max_day).contains(&day) {
        return Err(ParseError::OutOfRange { field: "day", value: day });
    }
    if hour > 23 {
        return Err(ParseError::OutOfRange { field: "hour", value: hour });
    }
    if minute > 59 {
        return Err(ParseError::OutOfRange { field: "minute", value: minute });
    }
    if second > 59 {
        return Err(ParseError::OutOfRange { field: "second", value: second });
    }

    Ok(DateTime::from_ymd_hms_milli(
        year as i32,
        month as u32,
        day as u32,
        hour as u32,
        minute as u32,
        second as u32,
        millisecond as u32,
    ))
}

fn expect_literal(src: &[u8], pos: &mut usize, expected: u8) -> Result<(), ParseError> {
    match src.get(*pos) {
        Some(&b) if b == expected => {
            *pos += 1;
            Ok(())
        }
        Some(_) => Err(ParseError::LiteralMismatch {
            expected: expected as char,
            at: *pos,
        }),
        None => Err(ParseError::UnexpectedEnd),
    }
}

/// Exactly `width` ASCII digits.
fn take_fixed_digits(
    src: &[u8],
    pos: &mut usize,
    width: usize,
    field: &'static str,
) -> Result<i64, ParseError> {
    let end = pos.checked_add(width).filter(|&e| e <= src.len());
    let end = end.ok_or(ParseError::UnexpectedEnd)?;
    let mut value: i64 = 0;
    for &b in &src[*pos..end] {
        if !b.is_ascii_digit() {
            return Err(ParseError::InvalidNumber { field });
        }
        value = value * 10 + (b - b'0') as i64;
    }
    *pos = end;
    Ok(value)
}

fn take_two_digits(src: &[u8], pos: &mut usize, field: &'static str) -> Result<i64, ParseError> {
    take_fixed_digits(src, pos, 2, field)
}

/// An optional sign followed by one to four digits (greedy).
fn take_year(src: &[u8], pos: &mut usize) -> Result<i64, ParseError> {
    let negative = src.get(*pos) == Some(&b'-');
    if negative {
        *pos += 1;
    }
    let mut digits = 0;
    let mut value: i64 = 0;
    while digits < 4 {
        match src.get(*pos) {
            Some(&b) if b.is_ascii_digit() => {
                value = value * 10 + (b - b'0') as i64;
                *pos += 1;
                digits += 1;
            }
            _ => break,
        }
    }
    if digits == 0 {
        return Err(ParseError::InvalidNumber { field: "year" });
    }
    Ok(if negative { -value } else { value })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_parse() {
        let dt = DateTime::parse("2022-01-31 12:34:56").unwrap();
        assert_eq!(dt.to_ymd(), (2022, 1, 31));
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.minute(), 34);
        assert_eq!(dt.second(), 56);
        assert_eq!(dt.millisecond(), 0);
    }

    #[test]
    fn test_custom_format_parse() {
        let dt = DateTime::parse_with_format("31/01/2022 12:34:56", "%d/%m/%Y %H:%M:%S").unwrap();
        assert_eq!(dt.to_ymd(), (2022, 1, 31));
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_millisecond_suffix_detection() {
        let dt = DateTime::parse("2022-01-31 12:34:56.789").unwrap();
        assert_eq!(dt.millisecond(), 789);

        // Without the period the same format parses whole seconds.
        let dt = DateTime::parse("2022-01-31 12:34:56").unwrap();
        assert_eq!(dt.millisecond(), 0);
    }

    #[test]
    fn test_partial_format_defaults() {
        let dt = DateTime::parse_with_format("2022-06", "%Y-%m").unwrap();
        assert_eq!(dt.to_ymd(), (2022, 6, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_garbage_fails() {
        assert!(DateTime::parse("not a date").is_err());
        assert!(DateTime::parse("2022-01-XX").is_err());
        assert!(DateTime::parse("").is_err());
    }

    #[test]
    fn test_trailing_input_fails() {
        let err = DateTime::parse_with_format("2022-01-31xyz", "%Y-%m-%d").unwrap_err();
        assert_eq!(err, ParseError::TrailingInput("xyz".to_string()));
    }

    #[test]
    fn test_impossible_dates_fail() {
        assert!(matches!(
            DateTime::parse("2022-13-01 00:00:00").unwrap_err(),
            ParseError::OutOfRange { field: "month", .. }
        ));
        assert!(matches!(
            DateTime::parse("2022-02-30 00:00:00").unwrap_err(),
            ParseError::OutOfRange { field: "day", .. }
        ));
        assert!(matches!(
            DateTime::parse("2022-01-01 24:00:00").unwrap_err(),
            ParseError::OutOfRange { field: "hour", .. }
        ));
        // Feb 29 is fine in a leap year only.
        assert!(DateTime::parse("2020-02-29 00:00:00").is_ok());
        assert!(DateTime::parse("2021-02-29 00:00:00").is_err());
    }

    #[test]
    fn test_unknown_specifier() {
        assert!(matches!(
            DateTime::parse_with_format("anything", "%Q").unwrap_err(),
            ParseError::UnsupportedSpecifier('Q')
        ));
        // Rendering passes unknown specifiers through untouched.
        let dt = DateTime::from_ymd(2022, 1, 31);
        assert_eq!(dt.format("%Q %Y"), "%Q 2022");
    }

    #[test]
    fn test_percent_escape() {
        let dt = DateTime::from_ymd(2022, 1, 31);
        assert_eq!(dt.format("%Y%%"), "2022%");
        assert!(DateTime::parse_with_format("2022%", "%Y%%").is_ok());
    }

    #[test]
    fn test_format_specifier_table() {
        let dt = DateTime::from_ymd_hms_milli(2022, 1, 31, 12, 34, 56, 789);
        assert_eq!(dt.format("%Y"), "2022");
        assert_eq!(dt.format("%m"), "01");
        assert_eq!(dt.format("%d"), "31");
        assert_eq!(dt.format("%H"), "12");
        assert_eq!(dt.format("%M"), "34");
        assert_eq!(dt.format("%S"), "56");
        assert_eq!(dt.format("%Y-%m"), "2022-01");
        assert_eq!(dt.format(DEFAULT_FORMAT), "2022-01-31 12:34:56");
    }

    #[test]
    fn test_format_with_millis() {
        let dt = DateTime::from_ymd_hms_milli(2022, 1, 31, 12, 34, 56, 789);
        assert_eq!(dt.format_with_millis(DEFAULT_FORMAT), "2022-01-31 12:34:56.789");

        // Whole-second values still render the full width.
        let dt = DateTime::from_ymd_hms(2022, 1, 31, 12, 34, 56);
        assert_eq!(dt.format_with_millis(DEFAULT_FORMAT), "2022-01-31 12:34:56.000");
    }

    #[test]
    fn test_iso_strings() {
        let dt = DateTime::from_ymd_hms_milli(2022, 1, 31, 12, 34, 56, 789);
        assert_eq!(dt.to_iso_string(), "2022-01-31T12:34:56");
        assert_eq!(dt.to_iso_string_millis(), "2022-01-31T12:34:56.789");
    }

    #[test]
    fn test_display_uses_default_format() {
        let dt = DateTime::from_ymd_hms(2022, 1, 15, 12, 30, 45);
        assert_eq!(dt.to_string(), "2022-01-15 12:30:45");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        let dt = DateTime::from_ymd_hms(2022, 3, 15, 14, 30, 45);
        let parsed = DateTime::parse(&dt.format(DEFAULT_FORMAT)).unwrap();
        assert_eq!(parsed, dt);
    }

    #[test]
    fn test_iso_msec_roundtrip() {
        let dt = DateTime::from_ymd_hms_milli(2022, 3, 15, 14, 30, 45, 500);
        let iso = dt.to_iso_string_millis();
        let parsed = DateTime::parse_with_format(&iso, "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(parsed.timestamp_millis(), dt.timestamp_millis());
    }

    #[test]
    fn test_negative_year_roundtrip() {
        let dt = DateTime::from_ymd(-44, 3, 15);
        let rendered = dt.format("%Y-%m-%d");
        assert_eq!(rendered, "-044-03-15");
        let parsed = DateTime::parse_with_format(&rendered, "%Y-%m-%d").unwrap();
        assert_eq!(parsed, dt);
    }
}
