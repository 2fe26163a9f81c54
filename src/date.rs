//! Strict calendar-date parsing.
//!
//! Deadlines, events, and persisted records all share one date shape:
//! four-digit year, two-digit month, two-digit day, `-` separated.
//! Impossible dates are rejected rather than clamped.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Leading and trailing whitespace is trimmed before validation. Anything
/// that does not match the shape exactly, or names a day that does not
/// exist on the Gregorian calendar, is `Error::InvalidDate`.
pub fn parse(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if !matches_shape(trimmed) {
        return Err(Error::InvalidDate(trimmed.to_string()));
    }

    let invalid = || Error::InvalidDate(trimmed.to_string());
    let year: i32 = trimmed[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = trimmed[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = trimmed[8..10].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn matches_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&at| bytes[at].is_ascii_digit())
}
