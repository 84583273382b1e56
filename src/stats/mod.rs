//! Activity statistics
//!
//! Classification of work items into categories, per-repository counting,
//! calendar bucketing and whole-range summaries.

pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod interval;
pub mod summary;

pub use aggregator::{get_statistics, statistic_total, CategoryStatistics, CountByRepository};
pub use classifier::{classify, is_member, Category};
pub use engine::{calculate_statistics, Bucket, IntervalSeries};
pub use interval::{Interval, TimeUnit};
pub use summary::{repository_totals, Summary, SummaryRow};
