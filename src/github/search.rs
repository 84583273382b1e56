//! Search result ingestion
//!
//! The platform is queried with four searches (authored issues, assigned
//! issues, authored pull requests, reviewed pull requests), each returning
//! pages of GraphQL `search` results. This module turns those pages into work
//! item collections. Network access stays behind [`SearchSource`]; the crate
//! ships a file-backed [`SearchSnapshot`] implementation.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::item::{IssueFields, ItemKind, ItemNumber, PullRequestFields, ReviewFields, WorkItem};
use crate::error::{StatsError, StatsResult};

/// Login reported by the platform for deleted accounts
const GHOST_LOGIN: &str = "ghost";

/// The four searches needed to build both collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    AuthoredIssues,
    AssignedIssues,
    AuthoredPullRequests,
    ReviewedPullRequests,
}

impl SearchKind {
    pub const ISSUE_SEARCHES: [SearchKind; 2] = [SearchKind::AuthoredIssues, SearchKind::AssignedIssues];
    pub const PULL_REQUEST_SEARCHES: [SearchKind; 2] =
        [SearchKind::AuthoredPullRequests, SearchKind::ReviewedPullRequests];

    pub fn item_kind(&self) -> ItemKind {
        match self {
            SearchKind::AuthoredIssues | SearchKind::AssignedIssues => ItemKind::Issue,
            SearchKind::AuthoredPullRequests | SearchKind::ReviewedPullRequests => ItemKind::PullRequest,
        }
    }

    /// Search string for `login` within `organization`
    pub fn query(&self, login: &str, organization: &str) -> String {
        let (qualifier, item_type) = match self {
            SearchKind::AuthoredIssues => ("author", "issue"),
            SearchKind::AssignedIssues => ("assignee", "issue"),
            SearchKind::AuthoredPullRequests => ("author", "pr"),
            SearchKind::ReviewedPullRequests => ("reviewed-by", "pr"),
        };
        format!(
            "{}:{} org:{} is:{} archived:false sort:created-desc",
            qualifier, login, organization, item_type
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<SearchNode>,
}

/// One page of a search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub search: SearchResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub url: String,
    pub number: ItemNumber,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub author: Option<Actor>,
    #[serde(default)]
    pub assignees: Connection<Actor>,
    pub repository: RepositoryRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNode {
    #[serde(default)]
    pub author: Option<Actor>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    #[serde(flatten)]
    pub base: IssueNode,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default)]
    pub reviews: Connection<ReviewNode>,
}

/// A search result node, tagged by the platform's `__typename`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum SearchNode {
    Issue(IssueNode),
    PullRequest(PullRequestNode),
    #[serde(other)]
    Other,
}

impl SearchNode {
    fn type_name(&self) -> &'static str {
        match self {
            SearchNode::Issue(_) => "Issue",
            SearchNode::PullRequest(_) => "PullRequest",
            SearchNode::Other => "unknown",
        }
    }
}

fn login_of(actor: Option<Actor>) -> String {
    actor.map_or_else(|| GHOST_LOGIN.to_string(), |a| a.login)
}

impl From<IssueNode> for IssueFields {
    fn from(node: IssueNode) -> Self {
        IssueFields {
            url: node.url,
            number: node.number,
            title: node.title,
            created_at: node.created_at,
            closed_at: node.closed_at,
            author: login_of(node.author),
            assignees: node.assignees.nodes.into_iter().map(|a| a.login).collect(),
            repository: node.repository.name,
        }
    }
}

impl From<PullRequestNode> for PullRequestFields {
    fn from(node: PullRequestNode) -> Self {
        PullRequestFields {
            issue: node.base.into(),
            merged_at: node.merged_at,
            reviews: node
                .reviews
                .nodes
                .into_iter()
                .map(|review| ReviewFields {
                    author: login_of(review.author),
                    created_at: review.created_at,
                })
                .collect(),
        }
    }
}

/// Convert search nodes into work items; every node must be of `expected` kind
pub fn convert_nodes(expected: ItemKind, nodes: impl IntoIterator<Item = SearchNode>) -> StatsResult<Vec<WorkItem>> {
    nodes
        .into_iter()
        .map(|node| match (expected, node) {
            (ItemKind::Issue, SearchNode::Issue(issue)) => WorkItem::issue(issue.into()),
            (ItemKind::PullRequest, SearchNode::PullRequest(pull_request)) => {
                WorkItem::pull_request(pull_request.into())
            }
            (expected, other) => Err(unexpected(expected, &other)),
        })
        .collect()
}

fn unexpected(expected: ItemKind, found: &SearchNode) -> StatsError {
    StatsError::UnknownNodeType {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// Flatten pages in order, stopping after the last page
///
/// Pages recorded after one reporting `hasNextPage: false` are ignored.
pub fn collect_nodes(query: &str, pages: Vec<SearchPage>) -> Vec<SearchNode> {
    let page_count = pages.len();
    let mut nodes = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        let has_next = page.search.page_info.has_next_page;
        nodes.extend(page.search.nodes);
        if !has_next {
            if index + 1 < page_count {
                warn!(
                    "Ignoring {} page(s) recorded after the last page of '{}'",
                    page_count - index - 1,
                    query
                );
            }
            break;
        }
    }
    debug!("Collected {} nodes for '{}'", nodes.len(), query);
    nodes
}

/// Something that can answer a search query with result pages
///
/// Each call restarts from the first page.
pub trait SearchSource {
    fn search(&self, query: &str) -> StatsResult<Vec<SearchPage>>;
}

/// Run both issue searches and build the issue collection
///
/// An issue both authored by and assigned to `login` appears in both searches
/// and is kept twice.
pub fn fetch_issues(source: &impl SearchSource, login: &str, organization: &str) -> StatsResult<Collection<WorkItem>> {
    run_searches(source, &SearchKind::ISSUE_SEARCHES, login, organization)
}

/// Run both pull request searches and build the pull request collection
pub fn fetch_pull_requests(
    source: &impl SearchSource,
    login: &str,
    organization: &str,
) -> StatsResult<Collection<WorkItem>> {
    run_searches(source, &SearchKind::PULL_REQUEST_SEARCHES, login, organization)
}

fn run_searches(
    source: &impl SearchSource,
    kinds: &[SearchKind],
    login: &str,
    organization: &str,
) -> StatsResult<Collection<WorkItem>> {
    let mut items = Collection::new();
    for kind in kinds {
        let query = kind.query(login, organization);
        let pages = source.search(&query)?;
        for item in convert_nodes(kind.item_kind(), collect_nodes(&query, pages))? {
            items.add_item(item);
        }
    }
    Ok(items)
}

/// One recorded search and its pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSearch {
    pub query: String,
    pub pages: Vec<SearchPage>,
}

/// Saved search responses for one login and organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub login: String,
    pub organization: String,
    #[serde(default)]
    pub searches: Vec<RecordedSearch>,
}

impl SearchSnapshot {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

impl SearchSource for SearchSnapshot {
    fn search(&self, query: &str) -> StatsResult<Vec<SearchPage>> {
        let recorded: HashMap<&str, &RecordedSearch> =
            self.searches.iter().map(|s| (s.query.as_str(), s)).collect();
        match recorded.get(query) {
            Some(search) => Ok(search.pages.clone()),
            None => {
                warn!("No recorded results for search '{}'", query);
                Ok(Vec::new())
            }
        }
    }
}
