//! Time series of activity statistics
//!
//! Splits the requested range into calendar buckets and runs the aggregator
//! for issues and pull requests in each one.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::StatsResult;
use crate::github::collection::Collection;
use crate::github::item::{ItemKind, WorkItem};
use crate::stats::aggregator::{get_statistics, CategoryStatistics};
use crate::stats::interval::{bucket, Interval, TimeUnit};

/// Statistics for one unit-length bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub interval: Interval,
    pub issues: CategoryStatistics,
    pub pull_requests: CategoryStatistics,
}

/// Ordered buckets covering the truncated range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSeries {
    pub interval: Interval,
    pub unit: TimeUnit,
    pub data: Vec<Bucket>,
}

impl IntervalSeries {
    /// Length of the truncated range in units
    pub fn duration(&self) -> usize {
        self.data.len()
    }
}

/// Compute per-bucket statistics for `login`
///
/// Pure with respect to its inputs: the collections are only read and every
/// call rebuilds the whole series.
pub fn calculate_statistics(
    unit: TimeUnit,
    raw_interval: &Interval,
    issues: &Collection<WorkItem>,
    pull_requests: &Collection<WorkItem>,
    login: &str,
) -> StatsResult<IntervalSeries> {
    let (interval, buckets) = bucket(unit, raw_interval)?;
    debug!(
        "Calculating {} statistics for '{}' over {} ({} issues, {} pull requests)",
        unit,
        login,
        interval,
        issues.len(),
        pull_requests.len()
    );

    let data = buckets
        .into_iter()
        .map(|current| Bucket {
            issues: get_statistics(issues, ItemKind::Issue, &current, login),
            pull_requests: get_statistics(pull_requests, ItemKind::PullRequest, &current, login),
            interval: current,
        })
        .collect();

    Ok(IntervalSeries { interval, unit, data })
}
