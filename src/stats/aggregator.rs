//! Per-repository category counting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::github::collection::Collection;
use crate::github::item::{ItemKind, WorkItem};
use crate::stats::classifier::{categories_for, classify, Category};
use crate::stats::interval::Interval;

/// Repository name to count; a missing repository means zero
pub type CountByRepository = BTreeMap<String, usize>;

/// Sum of all repository counts
pub fn statistic_total(counts: &CountByRepository) -> usize {
    counts.values().sum()
}

/// Counts for every category of one item kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStatistics {
    counts: BTreeMap<Category, CountByRepository>,
}

impl CategoryStatistics {
    /// Empty statistics holding one map per category of `kind`
    pub fn for_kind(kind: ItemKind) -> Self {
        Self {
            counts: categories_for(kind)
                .iter()
                .map(|category| (*category, CountByRepository::new()))
                .collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<&CountByRepository> {
        self.counts.get(&category)
    }

    /// Count for one repository, zero when absent
    pub fn count(&self, category: Category, repository: &str) -> usize {
        self.get(category)
            .and_then(|counts| counts.get(repository))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over all repositories for one category
    pub fn total(&self, category: Category) -> usize {
        self.get(category).map(statistic_total).unwrap_or(0)
    }

    pub fn categories(&self) -> impl Iterator<Item = (Category, &CountByRepository)> {
        self.counts.iter().map(|(category, counts)| (*category, counts))
    }

    // Categories outside the statistics' kind are not counted
    fn increment(&mut self, category: Category, repository: &str) {
        if let Some(counts) = self.counts.get_mut(&category) {
            *counts.entry(repository.to_string()).or_insert(0) += 1;
        }
    }
}

/// Count the items of `collection` per category and repository
///
/// `kind` selects which categories are reported. Each item is classified once
/// and may increment several categories.
pub fn get_statistics(
    collection: &Collection<WorkItem>,
    kind: ItemKind,
    interval: &Interval,
    login: &str,
) -> CategoryStatistics {
    let mut statistics = CategoryStatistics::for_kind(kind);
    for item in collection.iter() {
        for category in classify(item, interval, login) {
            statistics.increment(category, item.repository());
        }
    }
    statistics
}


#[cfg(test)]
mod tests {
    use super::fixtures::{issues, pull_requests};
    use super::*;
    use crate::github::timestamp::parse_timestamp;

    fn interval(start: &str, end: &str) -> Interval {
        Interval::new(parse_timestamp("t", start).unwrap(), parse_timestamp("t", end).unwrap()).unwrap()
    }

    fn counts(entries: &[(&str, usize)]) -> CountByRepository {
        entries.iter().map(|(repo, n)| (repo.to_string(), *n)).collect()
    }

    #[test]
    fn test_issues_created_by_login() {
        let stats = get_statistics(&issues(), ItemKind::Issue, &interval("2022-12-01", "2022-12-05"), "mat");
        assert_eq!(stats.get(Category::Created), Some(&counts(&[("repository1", 2)])));
    }

    #[test]
    fn test_issues_in_progress_by_login() {
        let stats = get_statistics(&issues(), ItemKind::Issue, &interval("2022-12-10", "2022-12-11"), "mat");
        assert_eq!(
            stats.get(Category::InProgress),
            Some(&counts(&[("repository1", 1), ("repository2", 1)]))
        );
    }

    #[test]
    fn test_issues_closed_by_login() {
        let stats = get_statistics(&issues(), ItemKind::Issue, &interval("2022-12-01", "2022-12-06"), "mat");
        assert_eq!(stats.get(Category::Closed), Some(&counts(&[("repository1", 1)])));
    }

    #[test]
    fn test_issue_statistics_have_only_issue_categories() {
        let stats = get_statistics(&issues(), ItemKind::Issue, &interval("2022-12-01", "2022-12-06"), "mat");
        let categories: Vec<Category> = stats.categories().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![Category::Created, Category::InProgress, Category::Closed]);
        assert!(stats.get(Category::Merged).is_none());
    }

    #[test]
    fn test_pull_requests_created_by_login() {
        let stats = get_statistics(&pull_requests(), ItemKind::PullRequest, &interval("2022-12-01", "2022-12-25"), "mat");
        assert_eq!(stats.get(Category::Created), Some(&counts(&[("repository1", 2)])));
    }

    #[test]
    fn test_pull_requests_in_progress_by_login() {
        let stats = get_statistics(&pull_requests(), ItemKind::PullRequest, &interval("2022-12-01", "2022-12-06"), "mat");
        assert_eq!(stats.get(Category::InProgress), Some(&counts(&[("repository1", 1)])));
    }

    #[test]
    fn test_pull_requests_closed_by_login() {
        let stats = get_statistics(&pull_requests(), ItemKind::PullRequest, &interval("2022-12-01", "2023-01-07"), "mat");
        assert_eq!(stats.get(Category::Closed), Some(&counts(&[("repository1", 1)])));
    }

    #[test]
    fn test_pull_requests_merged_by_login() {
        let stats = get_statistics(&pull_requests(), ItemKind::PullRequest, &interval("2022-01-10", "2023-01-13"), "mat");
        assert_eq!(stats.get(Category::Merged), Some(&counts(&[("repository1", 1)])));
    }

    #[test]
    fn test_pull_requests_reviewed_by_login() {
        let stats = get_statistics(&pull_requests(), ItemKind::PullRequest, &interval("2022-12-01", "2022-12-11"), "mat");
        assert_eq!(stats.get(Category::Reviewed), Some(&counts(&[("repository2", 1)])));
        assert_eq!(stats.count(Category::Reviewed, "repository1"), 0);
        assert_eq!(stats.total(Category::Reviewed), 1);
    }

    #[test]
    fn test_statistic_total() {
        assert_eq!(statistic_total(&counts(&[("a", 2), ("b", 3)])), 5);
        assert_eq!(statistic_total(&CountByRepository::new()), 0);
    }

    #[test]
    fn test_pull_requests_counted_as_issues_keep_issue_categories() {
        let stats = get_statistics(&pull_requests(), ItemKind::Issue, &interval("2022-12-01", "2022-12-25"), "mat");
        assert_eq!(stats.get(Category::Created), Some(&counts(&[("repository1", 2)])));
        assert_eq!(stats.get(Category::InProgress), Some(&counts(&[("repository1", 3)])));
        assert_eq!(stats.get(Category::Closed), Some(&CountByRepository::new()));
        assert!(stats.get(Category::Merged).is_none());
        assert!(stats.get(Category::Reviewed).is_none());
    }

    #[test]
    fn test_empty_collection_yields_empty_maps() {
        let stats = get_statistics(&Collection::new(), ItemKind::PullRequest, &interval("2022-12-01", "2022-12-11"), "mat");
        assert_eq!(stats, CategoryStatistics::for_kind(ItemKind::PullRequest));
        assert_eq!(stats.total(Category::Created), 0);
    }

    #[test]
    fn test_serializes_with_camel_case_category_keys() {
        let stats = get_statistics(&issues(), ItemKind::Issue, &interval("2022-12-10", "2022-12-11"), "mat");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["inProgress"]["repository2"], 1);
        assert_eq!(json["created"]["repository1"], 1);
        assert!(json["closed"].as_object().unwrap().is_empty());
    }
}
