//! Strict timestamp parsing for work item fields
//!
//! Accepts the ISO 8601 shapes the hosting platform emits and the shorter
//! forms used in hand-written fixtures:
//! - Full date-time with offset: "2022-12-03T10:30:00Z", "2022-12-03T10:30:00.5+02:00"
//! - Date-time without offset (UTC): "2022-12-03T10:30:00", "2022-12-03T10:30"
//! - Date only (UTC midnight): "2022-12-03"

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use crate::error::{StatsError, StatsResult};

/// Instant carried by every work item field
pub type Timestamp = DateTime<FixedOffset>;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a required timestamp field
pub fn parse_timestamp(field: &str, input: &str) -> StatsResult<Timestamp> {
    let rfc3339_error = match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(utc_offset().from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(utc_offset().from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    Err(StatsError::parse(field, input, rfc3339_error.to_string()))
}

/// Parse an optional timestamp field; `None` and `""` both mean absent
pub fn parse_optional_timestamp(field: &str, input: Option<&str>) -> StatsResult<Option<Timestamp>> {
    match input {
        None | Some("") => Ok(None),
        Some(text) => parse_timestamp(field, text).map(Some),
    }
}

/// Zero offset used for inputs that carry none
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let ts = parse_timestamp("createdAt", "2022-12-03").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2022, 12, 3));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 0, 0));
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let ts = parse_timestamp("createdAt", "2022-12-03T10:30:00+02:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(ts.hour(), 10);

        let utc = parse_timestamp("createdAt", "2022-12-03T08:30:00Z").unwrap();
        assert_eq!(ts, utc);
    }

    #[test]
    fn test_parse_naive_datetime_variants() {
        assert!(parse_timestamp("createdAt", "2022-12-03T10:30:00").is_ok());
        assert!(parse_timestamp("createdAt", "2022-12-03T10:30:00.250").is_ok());
        assert!(parse_timestamp("createdAt", "2022-12-03T10:30").is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_values() {
        assert!(parse_timestamp("createdAt", "2022-13-01").is_err());
        assert!(parse_timestamp("createdAt", "2022-02-30").is_err());
        assert!(parse_timestamp("createdAt", "yesterday").is_err());
        assert!(parse_timestamp("createdAt", "").is_err());
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = parse_timestamp("mergedAt", "not-a-date").unwrap_err();
        match err {
            StatsError::Parse { field, input, .. } => {
                assert_eq!(field, "mergedAt");
                assert_eq!(input, "not-a-date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_optional_timestamp_normalization() {
        assert_eq!(parse_optional_timestamp("closedAt", None).unwrap(), None);
        assert_eq!(parse_optional_timestamp("closedAt", Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_timestamp("closedAt", Some("2024-01-12")).unwrap(),
            Some(parse_timestamp("closedAt", "2024-01-12").unwrap())
        );
        assert!(parse_optional_timestamp("closedAt", Some("soon")).is_err());
    }
}
