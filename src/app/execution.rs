//! Report execution

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::cli::{date_parser, Args};
use crate::config::{ConfigManager, BASE_SECTION};
use crate::github::dataset::Dataset;
use crate::github::timestamp::Timestamp;
use crate::output::{render_report, ReportFormat};
use crate::stats::interval::TimeUnit;

/// Effective report settings after merging arguments and configuration
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub login: String,
    pub organization: String,
    pub unit: TimeUnit,
    pub format: ReportFormat,
}

impl ReportSettings {
    /// Precedence: command line, configuration, then the snapshot itself
    pub fn resolve(args: &Args, config: &ConfigManager, dataset: &Dataset) -> Result<Self> {
        let login = args
            .login
            .clone()
            .or_else(|| config.get_value(BASE_SECTION, "login").cloned())
            .unwrap_or_else(|| dataset.login().to_string());
        let organization = args
            .organization
            .clone()
            .or_else(|| config.get_value(BASE_SECTION, "organization").cloned())
            .unwrap_or_else(|| dataset.organization().to_string());
        let unit = match &args.unit {
            Some(unit) => unit.parse::<TimeUnit>()?,
            None => config.get_unit(BASE_SECTION, "unit")?.unwrap_or(TimeUnit::Month),
        };
        let format = args.format.parse::<ReportFormat>().map_err(|e| anyhow::anyhow!(e))?;

        Ok(Self {
            login,
            organization,
            unit,
            format,
        })
    }
}

/// Load the snapshot, compute the series and render it
pub fn run_report(args: &Args, config: &ConfigManager, now: Timestamp) -> Result<String> {
    let dataset = Dataset::from_snapshot(&args.snapshot)?;
    let settings = ReportSettings::resolve(args, config, &dataset)?;
    let range = date_parser::resolve_range(args.since.as_deref(), args.until.as_deref(), now)
        .context("Invalid reporting range")?;

    info!(
        "Reporting {} statistics for '{}' in '{}' over {}",
        settings.unit, settings.login, settings.organization, range
    );
    let series = dataset
        .calculate_statistics(settings.unit, &range, &settings.login)
        .context("Failed to calculate statistics")?;

    render_report(settings.format, &series, &settings.login, &settings.organization)
}

pub fn current_time() -> Timestamp {
    Utc::now().fixed_offset()
}
