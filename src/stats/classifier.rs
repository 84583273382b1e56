//! Activity category predicates
//!
//! Each predicate decides, for one item, one interval and one login, whether
//! the item belongs to a category. Categories are independent: an item can
//! match several at once, or none.
//!
//! `created`, `closed`, `merged` and `reviewed` use the half-open
//! [`Interval::contains`]. `in_progress` compares against the interval end
//! non-strictly on both sides, so an item still open at the instant a bucket
//! ends is in progress for that bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::github::item::{ItemDetails, ItemKind, PullRequestDetails, WorkItem};
use crate::stats::interval::Interval;

/// One activity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Created,
    InProgress,
    Closed,
    Merged,
    Reviewed,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Created => "created",
            Category::InProgress => "in progress",
            Category::Closed => "closed",
            Category::Merged => "merged",
            Category::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const ISSUE_CATEGORIES: [Category; 3] = [Category::Created, Category::InProgress, Category::Closed];

pub const PULL_REQUEST_CATEGORIES: [Category; 5] = [
    Category::Created,
    Category::InProgress,
    Category::Closed,
    Category::Merged,
    Category::Reviewed,
];

/// Categories reported for a kind of item
pub fn categories_for(kind: ItemKind) -> &'static [Category] {
    match kind {
        ItemKind::Issue => &ISSUE_CATEGORIES,
        ItemKind::PullRequest => &PULL_REQUEST_CATEGORIES,
    }
}

/// Whether `item` falls into `category` for `interval` and `login`
pub fn is_member(item: &WorkItem, category: Category, interval: &Interval, login: &str) -> bool {
    match item.details() {
        ItemDetails::Issue => issue_matches(item, category, interval, login),
        ItemDetails::PullRequest(details) => pull_request_matches(item, details, category, interval, login),
    }
}

/// Every category of the item's kind that `item` falls into
pub fn classify(item: &WorkItem, interval: &Interval, login: &str) -> Vec<Category> {
    categories_for(item.kind())
        .iter()
        .copied()
        .filter(|category| is_member(item, *category, interval, login))
        .collect()
}

// Issues: authorship decides `created`, assignment decides the rest.
fn issue_matches(item: &WorkItem, category: Category, interval: &Interval, login: &str) -> bool {
    match category {
        Category::Created => item.author() == login && interval.contains(item.created_at()),
        Category::InProgress => item.assignees().contains(login) && open_at_end(item, interval),
        Category::Closed => {
            item.assignees().contains(login)
                && item.closed_at().is_some_and(|closed| interval.contains(closed))
        }
        Category::Merged | Category::Reviewed => false,
    }
}

// Pull requests: authorship decides everything except `reviewed`, which
// only counts reviews on other people's pull requests.
fn pull_request_matches(
    item: &WorkItem,
    details: &PullRequestDetails,
    category: Category,
    interval: &Interval,
    login: &str,
) -> bool {
    let authored = item.author() == login;
    match category {
        Category::Created => authored && interval.contains(item.created_at()),
        Category::InProgress => authored && open_at_end(item, interval),
        Category::Closed => {
            authored
                && details.merged_at().is_none()
                && item.closed_at().is_some_and(|closed| interval.contains(closed))
        }
        Category::Merged => authored && details.merged_at().is_some_and(|merged| interval.contains(merged)),
        Category::Reviewed => {
            !authored
                && details
                    .reviews_by(login)
                    .is_some_and(|reviews| reviews.iter().any(|reviewed| interval.contains(*reviewed)))
        }
    }
}

fn open_at_end(item: &WorkItem, interval: &Interval) -> bool {
    item.created_at() <= interval.end() && item.closed_at().map_or(true, |closed| closed >= interval.end())
}
