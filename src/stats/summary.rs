//! Whole-range summaries derived from a computed series

use std::collections::BTreeMap;

use serde::Serialize;

use crate::github::item::ItemKind;
use crate::stats::aggregator::CategoryStatistics;
use crate::stats::classifier::Category;
use crate::stats::engine::{Bucket, IntervalSeries};
use crate::stats::interval::{Interval, TimeUnit};

/// Rows reported by [`Summary`], in display order
const SUMMARY_ROWS: [(&str, ItemKind, Category); 6] = [
    ("Issues created", ItemKind::Issue, Category::Created),
    ("Issues closed", ItemKind::Issue, Category::Closed),
    ("Pull requests created", ItemKind::PullRequest, Category::Created),
    ("Pull requests merged", ItemKind::PullRequest, Category::Merged),
    ("Pull requests closed", ItemKind::PullRequest, Category::Closed),
    ("Pull requests reviewed", ItemKind::PullRequest, Category::Reviewed),
];

/// One line of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub kind: ItemKind,
    pub category: Category,
    pub total: usize,
    pub average: f64,
}

/// Totals and per-unit averages over a whole series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub interval: Interval,
    pub unit: TimeUnit,
    pub duration: usize,
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn from_series(series: &IntervalSeries) -> Self {
        let duration = series.duration();
        let rows = SUMMARY_ROWS
            .iter()
            .map(|(label, kind, category)| {
                let total: usize = series
                    .data
                    .iter()
                    .map(|bucket| statistics_of(bucket, *kind).total(*category))
                    .sum();
                SummaryRow {
                    label: *label,
                    kind: *kind,
                    category: *category,
                    total,
                    average: average(total, duration),
                }
            })
            .collect();

        Self {
            interval: series.interval,
            unit: series.unit,
            duration,
            rows,
        }
    }

    /// Human readable duration, e.g. "3 months"
    pub fn duration_text(&self) -> String {
        if self.duration == 1 {
            format!("1 {}", self.unit)
        } else {
            format!("{} {}s", self.duration, self.unit)
        }
    }
}

/// Per repository totals of `categories` across all buckets
///
/// Every repository seen in any requested category gets an entry for each
/// requested category, zero-filled where it had no activity.
pub fn repository_totals(
    series: &IntervalSeries,
    kind: ItemKind,
    categories: &[Category],
) -> BTreeMap<String, BTreeMap<Category, usize>> {
    let mut totals: BTreeMap<String, BTreeMap<Category, usize>> = BTreeMap::new();
    for bucket in &series.data {
        let statistics = statistics_of(bucket, kind);
        for category in categories {
            let Some(counts) = statistics.get(*category) else {
                continue;
            };
            for (repository, count) in counts {
                let entry = totals.entry(repository.clone()).or_default();
                *entry.entry(*category).or_insert(0) += count;
            }
        }
    }
    for per_category in totals.values_mut() {
        for category in categories {
            per_category.entry(*category).or_insert(0);
        }
    }
    totals
}

fn statistics_of(bucket: &Bucket, kind: ItemKind) -> &CategoryStatistics {
    match kind {
        ItemKind::Issue => &bucket.issues,
        ItemKind::PullRequest => &bucket.pull_requests,
    }
}

fn average(total: usize, duration: usize) -> f64 {
    if duration == 0 {
        0.0
    } else {
        total as f64 / duration as f64
    }
}
