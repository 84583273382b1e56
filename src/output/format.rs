//! Report formats and the compact one-line form

use std::str::FromStr;

use crate::stats::aggregator::{statistic_total, CategoryStatistics};
use crate::stats::engine::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Range, totals table and one line per bucket
    #[default]
    Summary,
    /// The serialized interval series
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(ReportFormat::Summary),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Invalid report format: {}. Valid options: summary, json", s)),
        }
    }
}

/// Types that can be shown on a single line
pub trait CompactFormat {
    fn to_compact_format(&self) -> String;
}

impl CompactFormat for CategoryStatistics {
    fn to_compact_format(&self) -> String {
        self.categories()
            .map(|(category, counts)| format!("{} {}", statistic_total(counts), category))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl CompactFormat for Bucket {
    fn to_compact_format(&self) -> String {
        format!(
            "{} | Issues: {} | Pull requests: {}",
            self.interval,
            self.issues.to_compact_format(),
            self.pull_requests.to_compact_format()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::item::ItemKind;
    use crate::github::timestamp::parse_timestamp;
    use crate::stats::interval::Interval;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("summary".parse::<ReportFormat>().unwrap(), ReportFormat::Summary);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("csv".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default(), ReportFormat::Summary);
    }

    #[test]
    fn test_empty_bucket_compact_format() {
        let bucket = Bucket {
            interval: Interval::new(
                parse_timestamp("t", "2023-02-01").unwrap(),
                parse_timestamp("t", "2023-03-01").unwrap(),
            )
            .unwrap(),
            issues: CategoryStatistics::for_kind(ItemKind::Issue),
            pull_requests: CategoryStatistics::for_kind(ItemKind::PullRequest),
        };

        let line = bucket.to_compact_format();
        assert_eq!(
            line,
            "2023-02-01 through 2023-03-01 | Issues: 0 created, 0 in progress, 0 closed \
             | Pull requests: 0 created, 0 in progress, 0 closed, 0 merged, 0 reviewed"
        );
        assert!(!line.contains('\n'));
    }
}
