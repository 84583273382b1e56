//! Collections of work items for one login and organization

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::collection::Collection;
use super::item::WorkItem;
use super::search::{fetch_issues, fetch_pull_requests, SearchSnapshot, SearchSource};
use crate::error::StatsResult;
use crate::stats::engine::{calculate_statistics, IntervalSeries};
use crate::stats::interval::{Interval, TimeUnit};

/// Issues and pull requests retrieved for `login` within `organization`
///
/// Retrieval replaces both collections wholesale; statistics only read them.
#[derive(Debug, Default)]
pub struct Dataset {
    login: String,
    organization: String,
    issues: Collection<WorkItem>,
    pull_requests: Collection<WorkItem>,
}

impl Dataset {
    pub fn new(login: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            organization: organization.into(),
            issues: Collection::new(),
            pull_requests: Collection::new(),
        }
    }

    /// Load a saved search snapshot and build both collections from it
    pub fn from_snapshot(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let snapshot = SearchSnapshot::from_json(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

        let mut dataset = Self::new(snapshot.login.clone(), snapshot.organization.clone());
        dataset
            .fetch(&snapshot)
            .with_context(|| format!("Failed to load work items from {}", path.display()))?;
        Ok(dataset)
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn issues(&self) -> &Collection<WorkItem> {
        &self.issues
    }

    pub fn pull_requests(&self) -> &Collection<WorkItem> {
        &self.pull_requests
    }

    /// Retrieve both collections from `source`
    ///
    /// Both collections are built before either is replaced, so a failure
    /// leaves the previous contents untouched.
    pub fn fetch(&mut self, source: &impl SearchSource) -> StatsResult<()> {
        let issues = fetch_issues(source, &self.login, &self.organization)?;
        let pull_requests = fetch_pull_requests(source, &self.login, &self.organization)?;
        info!(
            "Retrieved {} issues and {} pull requests for '{}' in '{}'",
            issues.len(),
            pull_requests.len(),
            self.login,
            self.organization
        );
        self.replace(issues, pull_requests);
        Ok(())
    }

    pub fn replace(&mut self, issues: Collection<WorkItem>, pull_requests: Collection<WorkItem>) {
        self.issues = issues;
        self.pull_requests = pull_requests;
    }

    /// Bucketed statistics for `login` over `interval`
    ///
    /// `login` need not match the login used for retrieval.
    pub fn calculate_statistics(&self, unit: TimeUnit, interval: &Interval, login: &str) -> StatsResult<IntervalSeries> {
        calculate_statistics(unit, interval, &self.issues, &self.pull_requests, login)
    }
}
