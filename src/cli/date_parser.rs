//! Date arguments for `--since` and `--until`
//!
//! Accepts the timestamp forms understood for work items ("2023-01-01",
//! "2023-01-01T10:30:00", RFC 3339) plus relative forms such as "today",
//! "yesterday", "last month" and "3 weeks ago". Relative forms are resolved
//! against a caller supplied `now`.

use chrono::{Duration, Months};

use crate::github::timestamp::{parse_timestamp, Timestamp};
use crate::stats::interval::{Interval, TimeUnit};

#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    #[error("Invalid date format: {input}. Expected ISO 8601 (YYYY-MM-DD) or relative format (e.g., '1 week ago')")]
    InvalidFormat { input: String },

    #[error("Invalid relative date: {input}. Expected format like '1 week ago', 'yesterday', 'last month'")]
    InvalidRelativeFormat { input: String },

    #[error("Unsupported time unit: {unit}. Supported units: hours, days, weeks, months, years")]
    UnsupportedUnit { unit: String },

    #[error("Invalid number in relative date: {input}")]
    InvalidNumber { input: String },

    #[error("Date range validation failed: start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },
}

pub fn parse_date(input: &str, now: Timestamp) -> Result<Timestamp, DateParseError> {
    let trimmed = input.trim();
    if let Ok(timestamp) = parse_timestamp("date", trimmed) {
        return Ok(timestamp);
    }
    parse_relative_date(trimmed, now)
}

fn parse_relative_date(input: &str, now: Timestamp) -> Result<Timestamp, DateParseError> {
    let lower = input.to_lowercase();
    let today = TimeUnit::Day.start_of(now);
    let relative = match lower.as_str() {
        "now" => Some(now),
        "today" => Some(today),
        "yesterday" => today.checked_sub_signed(Duration::days(1)),
        "last week" => now.checked_sub_signed(Duration::weeks(1)),
        "last month" => now.checked_sub_months(Months::new(1)),
        "last year" => now.checked_sub_months(Months::new(12)),
        _ => return parse_ago(input, &lower, now),
    };
    relative.ok_or_else(|| DateParseError::InvalidFormat { input: input.to_string() })
}

// "<n> <unit> ago"
fn parse_ago(input: &str, lower: &str, now: Timestamp) -> Result<Timestamp, DateParseError> {
    let parts: Vec<&str> = lower.split_whitespace().collect();
    let [number, unit, "ago"] = parts.as_slice() else {
        return Err(DateParseError::InvalidRelativeFormat { input: input.to_string() });
    };
    let count = number
        .parse::<u32>()
        .map_err(|_| DateParseError::InvalidNumber { input: input.to_string() })?;

    let result = match *unit {
        "hour" | "hours" => now.checked_sub_signed(Duration::hours(count.into())),
        "day" | "days" => now.checked_sub_signed(Duration::days(count.into())),
        "week" | "weeks" => now.checked_sub_signed(Duration::weeks(count.into())),
        "month" | "months" => now.checked_sub_months(Months::new(count)),
        "year" | "years" => count
            .checked_mul(12)
            .and_then(|months| now.checked_sub_months(Months::new(months))),
        _ => return Err(DateParseError::UnsupportedUnit { unit: unit.to_string() }),
    };
    result.ok_or_else(|| DateParseError::InvalidFormat { input: input.to_string() })
}

/// Resolve the reporting range from optional `--since` and `--until`
///
/// `until` defaults to `now` and `since` to one year before `until`.
pub fn resolve_range(since: Option<&str>, until: Option<&str>, now: Timestamp) -> Result<Interval, DateParseError> {
    let end = match until {
        Some(input) => parse_date(input, now)?,
        None => now,
    };
    let start = match since {
        Some(input) => parse_date(input, now)?,
        None => end
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| DateParseError::InvalidFormat { input: end.to_rfc3339() })?,
    };
    Interval::new(start, end).map_err(|_| DateParseError::InvalidRange {
        start: since.map_or_else(|| start.to_rfc3339(), str::to_string),
        end: until.map_or_else(|| end.to_rfc3339(), str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        parse_timestamp("now", "2023-03-15T10:30:00Z").unwrap()
    }

    fn ts(input: &str) -> Timestamp {
        parse_timestamp("t", input).unwrap()
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(parse_date("2023-01-01", now()).unwrap(), ts("2023-01-01T00:00:00Z"));
        assert_eq!(parse_date("2023-01-01T10:30:00", now()).unwrap(), ts("2023-01-01T10:30:00Z"));
        assert_eq!(
            parse_date("2023-01-01T10:30:00+02:00", now()).unwrap(),
            ts("2023-01-01T08:30:00Z")
        );
    }

    #[test]
    fn test_named_relative_dates() {
        assert_eq!(parse_date("now", now()).unwrap(), now());
        assert_eq!(parse_date("today", now()).unwrap(), ts("2023-03-15"));
        assert_eq!(parse_date("Yesterday", now()).unwrap(), ts("2023-03-14"));
        assert_eq!(parse_date("last week", now()).unwrap(), ts("2023-03-08T10:30:00Z"));
        assert_eq!(parse_date("LAST MONTH", now()).unwrap(), ts("2023-02-15T10:30:00Z"));
        assert_eq!(parse_date("last year", now()).unwrap(), ts("2022-03-15T10:30:00Z"));
    }

    #[test]
    fn test_ago_dates() {
        assert_eq!(parse_date("2 hours ago", now()).unwrap(), ts("2023-03-15T08:30:00Z"));
        assert_eq!(parse_date("1 day ago", now()).unwrap(), ts("2023-03-14T10:30:00Z"));
        assert_eq!(parse_date("3 weeks ago", now()).unwrap(), ts("2023-02-22T10:30:00Z"));
        assert_eq!(parse_date("1 month ago", now()).unwrap(), ts("2023-02-15T10:30:00Z"));
        assert_eq!(parse_date("  2 years ago ", now()).unwrap(), ts("2021-03-15T10:30:00Z"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(parse_date("not-a-date", now()), Err(DateParseError::InvalidRelativeFormat { .. })));
        assert!(matches!(parse_date("2023-13-01", now()), Err(DateParseError::InvalidRelativeFormat { .. })));
        assert!(matches!(parse_date("abc days ago", now()), Err(DateParseError::InvalidNumber { .. })));
        assert!(matches!(parse_date("1 fortnight ago", now()), Err(DateParseError::UnsupportedUnit { .. })));
        assert!(parse_date("1 day", now()).is_err());
    }

    #[test]
    fn test_resolve_range_defaults() {
        let range = resolve_range(None, None, now()).unwrap();
        assert_eq!(range.end(), now());
        assert_eq!(range.start(), ts("2022-03-15T10:30:00Z"));

        let range = resolve_range(None, Some("2023-01-01"), now()).unwrap();
        assert_eq!(range.start(), ts("2022-01-01"));

        let range = resolve_range(Some("2023-02-01"), None, now()).unwrap();
        assert_eq!(range.start(), ts("2023-02-01"));
        assert_eq!(range.end(), now());
    }

    #[test]
    fn test_resolve_range_rejects_reversed_bounds() {
        let err = resolve_range(Some("2023-12-31"), Some("2023-01-01"), now()).unwrap_err();
        assert!(matches!(err, DateParseError::InvalidRange { .. }));
    }
}
