//! Work item records
//!
//! A work item is one issue or one pull request. Both share the same base
//! record; pull requests carry an extra [`PullRequestDetails`] selected by the
//! [`ItemDetails`] variant. Items are built once from raw fields and never
//! mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::timestamp::{parse_optional_timestamp, parse_timestamp, Timestamp};
use crate::error::StatsResult;

/// Item number as delivered by the platform (text or integer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemNumber {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemNumber::Number(n) => write!(f, "{}", n),
            ItemNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemNumber {
    fn from(value: &str) -> Self {
        ItemNumber::Text(value.to_string())
    }
}

impl From<i64> for ItemNumber {
    fn from(value: i64) -> Self {
        ItemNumber::Number(value)
    }
}

/// Raw issue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    pub url: String,
    pub number: ItemNumber,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
    pub author: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub repository: String,
}

/// One submitted review in a raw pull request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFields {
    pub author: String,
    pub created_at: String,
}

/// Raw pull request record: the issue fields plus merge and review data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestFields {
    #[serde(flatten)]
    pub issue: IssueFields,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewFields>,
}

/// Which kind of work item a record is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Issue,
    PullRequest,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Issue => f.write_str("Issue"),
            ItemKind::PullRequest => f.write_str("PullRequest"),
        }
    }
}

/// Pull request specific data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PullRequestDetails {
    merged_at: Option<Timestamp>,
    reviews: HashMap<String, Vec<Timestamp>>,
}

impl PullRequestDetails {
    pub fn merged_at(&self) -> Option<Timestamp> {
        self.merged_at
    }

    /// Review timestamps keyed by reviewer login, each list in arrival order
    pub fn reviews(&self) -> &HashMap<String, Vec<Timestamp>> {
        &self.reviews
    }

    /// Reviews submitted by one reviewer, if any
    pub fn reviews_by(&self, reviewer: &str) -> Option<&[Timestamp]> {
        self.reviews.get(reviewer).map(Vec::as_slice)
    }

    fn parse_reviews(reviews: &[ReviewFields]) -> StatsResult<HashMap<String, Vec<Timestamp>>> {
        let mut parsed: HashMap<String, Vec<Timestamp>> = HashMap::new();
        for review in reviews {
            let submitted = parse_timestamp("reviews.createdAt", &review.created_at)?;
            parsed.entry(review.author.clone()).or_default().push(submitted);
        }
        Ok(parsed)
    }
}

/// Variant data for a work item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetails {
    Issue,
    PullRequest(PullRequestDetails),
}

/// Immutable issue or pull request
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    url: String,
    number: String,
    title: String,
    created_at: Timestamp,
    closed_at: Option<Timestamp>,
    author: String,
    assignees: HashSet<String>,
    repository: String,
    details: ItemDetails,
}

impl WorkItem {
    /// Build an issue from its raw fields
    ///
    /// Fails if `created_at` is not a valid timestamp or `closed_at` is
    /// non-empty and invalid.
    pub fn issue(fields: IssueFields) -> StatsResult<Self> {
        Self::from_base(fields, ItemDetails::Issue)
    }

    /// Build a pull request from its raw fields
    pub fn pull_request(fields: PullRequestFields) -> StatsResult<Self> {
        let merged_at = parse_optional_timestamp("mergedAt", fields.merged_at.as_deref())?;
        let reviews = PullRequestDetails::parse_reviews(&fields.reviews)?;
        Self::from_base(
            fields.issue,
            ItemDetails::PullRequest(PullRequestDetails { merged_at, reviews }),
        )
    }

    fn from_base(fields: IssueFields, details: ItemDetails) -> StatsResult<Self> {
        let created_at = parse_timestamp("createdAt", &fields.created_at)?;
        let closed_at = parse_optional_timestamp("closedAt", fields.closed_at.as_deref())?;
        Ok(Self {
            url: fields.url,
            number: fields.number.to_string(),
            title: fields.title,
            created_at,
            closed_at,
            author: fields.author,
            assignees: fields.assignees.into_iter().collect(),
            repository: fields.repository,
            details,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn closed_at(&self) -> Option<Timestamp> {
        self.closed_at
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn assignees(&self) -> &HashSet<String> {
        &self.assignees
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn kind(&self) -> ItemKind {
        match self.details {
            ItemDetails::Issue => ItemKind::Issue,
            ItemDetails::PullRequest(_) => ItemKind::PullRequest,
        }
    }

    /// Pull request data, `None` for issues
    pub fn pull_request_details(&self) -> Option<&PullRequestDetails> {
        match &self.details {
            ItemDetails::PullRequest(details) => Some(details),
            ItemDetails::Issue => None,
        }
    }

    /// Merge time; always `None` for issues
    pub fn merged_at(&self) -> Option<Timestamp> {
        self.pull_request_details().and_then(PullRequestDetails::merged_at)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn issue_fields(number: i64, created_at: &str, closed_at: Option<&str>) -> IssueFields {
        IssueFields {
            url: format!("www.fake_{}.com", number),
            number: ItemNumber::Text(number.to_string()),
            title: format!("fake {}", number),
            created_at: created_at.to_string(),
            closed_at: closed_at.map(str::to_string),
            author: "mat".to_string(),
            assignees: vec!["mat".to_string()],
            repository: "repository1".to_string(),
        }
    }

    pub fn review(author: &str, created_at: &str) -> ReviewFields {
        ReviewFields {
            author: author.to_string(),
            created_at: created_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::github::timestamp::parse_timestamp;

    #[test]
    fn test_issue_accessors() {
        let mut fields = issue_fields(1, "2022-12-03", Some("2024-01-12"));
        fields.assignees = vec!["bob".to_string(), "susan".to_string(), "bob".to_string()];
        let issue = WorkItem::issue(fields).unwrap();

        assert_eq!(issue.url(), "www.fake_1.com");
        assert_eq!(issue.number(), "1");
        assert_eq!(issue.title(), "fake 1");
        assert_eq!(issue.created_at(), parse_timestamp("t", "2022-12-03").unwrap());
        assert_eq!(issue.closed_at(), Some(parse_timestamp("t", "2024-01-12").unwrap()));
        assert_eq!(issue.author(), "mat");
        assert_eq!(issue.assignees().len(), 2);
        assert!(issue.assignees().contains("susan"));
        assert_eq!(issue.repository(), "repository1");
        assert_eq!(issue.kind(), ItemKind::Issue);
        assert!(issue.merged_at().is_none());
        assert!(issue.pull_request_details().is_none());
    }

    #[test]
    fn test_numeric_number_is_stringified() {
        let mut fields = issue_fields(1, "2022-12-03", None);
        fields.number = ItemNumber::Number(42);
        let issue = WorkItem::issue(fields).unwrap();
        assert_eq!(issue.number(), "42");
    }

    #[test]
    fn test_empty_or_null_closed_at_is_absent() {
        let issue = WorkItem::issue(issue_fields(1, "2022-12-03", Some(""))).unwrap();
        assert_eq!(issue.closed_at(), None);
        let issue = WorkItem::issue(issue_fields(1, "2022-12-03", None)).unwrap();
        assert_eq!(issue.closed_at(), None);
    }

    #[test]
    fn test_invalid_timestamps_abort_construction() {
        assert!(WorkItem::issue(issue_fields(1, "not a date", None)).is_err());
        assert!(WorkItem::issue(issue_fields(1, "", None)).is_err());
        assert!(WorkItem::issue(issue_fields(1, "2022-12-03", Some("2022-12-32"))).is_err());
    }

    #[test]
    fn test_pull_request_reviews_grouped_in_arrival_order() {
        let fields = PullRequestFields {
            issue: issue_fields(2, "2022-12-03", None),
            merged_at: Some("2023-01-12".to_string()),
            reviews: vec![
                review("bob", "2022-12-11"),
                review("mat", "2022-12-09"),
                review("bob", "2022-12-05"),
            ],
        };
        let pr = WorkItem::pull_request(fields).unwrap();
        let details = pr.pull_request_details().unwrap();

        assert_eq!(pr.kind(), ItemKind::PullRequest);
        assert_eq!(pr.merged_at(), Some(parse_timestamp("t", "2023-01-12").unwrap()));
        assert_eq!(
            details.reviews_by("bob").unwrap(),
            &[
                parse_timestamp("t", "2022-12-11").unwrap(),
                parse_timestamp("t", "2022-12-05").unwrap(),
            ]
        );
        assert_eq!(details.reviews_by("mat").unwrap().len(), 1);
        assert!(details.reviews_by("susan").is_none());
    }

    #[test]
    fn test_pull_request_invalid_review_fails() {
        let fields = PullRequestFields {
            issue: issue_fields(2, "2022-12-03", None),
            merged_at: None,
            reviews: vec![review("bob", "2022-12-11"), review("mat", "later")],
        };
        assert!(WorkItem::pull_request(fields).is_err());
    }

    #[test]
    fn test_pull_request_empty_merged_at_is_absent() {
        let fields = PullRequestFields {
            issue: issue_fields(2, "2022-12-03", None),
            merged_at: Some(String::new()),
            reviews: Vec::new(),
        };
        let pr = WorkItem::pull_request(fields).unwrap();
        assert!(pr.merged_at().is_none());
        assert!(pr.pull_request_details().unwrap().reviews().is_empty());
    }

    #[test]
    fn test_deserialize_pull_request_record() {
        let json = r#"{
            "url": "www.fake_5.com",
            "number": 5,
            "title": "fake 5",
            "createdAt": "2022-12-05",
            "closedAt": null,
            "mergedAt": "",
            "author": "bob",
            "assignees": [],
            "reviews": [{"author": "mat", "createdAt": "2022-12-06"}],
            "repository": "repository2"
        }"#;
        let fields: PullRequestFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.issue.number, ItemNumber::Number(5));
        let pr = WorkItem::pull_request(fields).unwrap();
        assert_eq!(pr.number(), "5");
        assert!(pr.closed_at().is_none());
        assert!(pr.merged_at().is_none());
        assert_eq!(pr.pull_request_details().unwrap().reviews_by("mat").unwrap().len(), 1);
    }
}
