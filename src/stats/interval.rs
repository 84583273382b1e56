//! Half-open intervals and calendar bucketing
//!
//! An [`Interval`] is `[start, end)`. [`bucket`] snaps a raw interval outward
//! to whole units and splits it into consecutive one-unit buckets.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::github::timestamp::Timestamp;

/// Calendar unit used for bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    /// Start of the unit containing `ts`, in the offset `ts` carries
    ///
    /// Weeks start on Monday.
    pub fn start_of(&self, ts: Timestamp) -> Timestamp {
        let local = ts.naive_local();
        let date = local.date();
        let first_day = match self {
            TimeUnit::Day => date,
            TimeUnit::Week => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
            TimeUnit::Month => date.with_day(1).unwrap_or(date),
            TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        };
        ts - (local - first_day.and_time(NaiveTime::MIN))
    }

    /// `ts` advanced by exactly one unit
    pub fn add_one(&self, ts: Timestamp) -> StatsResult<Timestamp> {
        let next = match self {
            TimeUnit::Day => ts.checked_add_signed(Duration::days(1)),
            TimeUnit::Week => ts.checked_add_signed(Duration::weeks(1)),
            TimeUnit::Month => ts.checked_add_months(Months::new(1)),
            TimeUnit::Year => ts.checked_add_months(Months::new(12)),
        };
        next.ok_or_else(|| StatsError::OutOfRange {
            timestamp: ts.to_rfc3339(),
            unit: self.as_str().to_string(),
        })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(TimeUnit::Day),
            "week" | "weeks" => Ok(TimeUnit::Week),
            "month" | "months" => Ok(TimeUnit::Month),
            "year" | "years" => Ok(TimeUnit::Year),
            _ => Err(StatsError::UnsupportedUnit { unit: s.to_string() }),
        }
    }
}

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    /// Create an interval; fails when `end` is before `start`
    pub fn new(start: Timestamp, end: Timestamp) -> StatsResult<Self> {
        if end < start {
            return Err(StatsError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// `start <= ts < end`
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} through {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// Snap `raw` outward to whole units
///
/// The result starts at the unit containing `raw.start()` and ends one unit
/// after the start of the unit containing `raw.end()`. Both ends are
/// computed in the offset of `raw.start()`.
pub fn truncate(unit: TimeUnit, raw: &Interval) -> StatsResult<Interval> {
    let start = unit.start_of(raw.start());
    let end = raw.end().with_timezone(raw.start().offset());
    let end = unit.add_one(unit.start_of(end))?;
    Ok(Interval { start, end })
}

/// Split a unit-aligned interval into consecutive one-unit buckets
pub fn split(unit: TimeUnit, truncated: &Interval) -> StatsResult<Vec<Interval>> {
    let mut buckets = Vec::new();
    let mut cursor = truncated.start();
    while cursor < truncated.end() {
        let next = unit.add_one(cursor)?;
        buckets.push(Interval { start: cursor, end: next });
        cursor = next;
    }
    Ok(buckets)
}

/// Truncate `raw` and split it, returning the overall interval and its buckets
pub fn bucket(unit: TimeUnit, raw: &Interval) -> StatsResult<(Interval, Vec<Interval>)> {
    let truncated = truncate(unit, raw)?;
    let buckets = split(unit, &truncated)?;
    log::trace!("Split {} into {} {} buckets", truncated, buckets.len(), unit);
    Ok((truncated, buckets))
}
