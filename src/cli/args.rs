use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use crate::output::ReportFormat;
use crate::stats::interval::TimeUnit;

/// GitHub activity statistics
#[derive(Parser, Debug)]
#[command(name = "ghstats")]
#[command(about = "Per-repository issue and pull request statistics over calendar intervals")]
#[command(version)]
pub struct Args {
    /// Saved search snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Login to compute statistics for (defaults to the snapshot login)
    #[arg(short = 'l', long, value_name = "LOGIN")]
    pub login: Option<String>,

    /// Organization name reported with the results
    #[arg(short = 'o', long, value_name = "ORG")]
    pub organization: Option<String>,

    /// Bucket size: day, week, month or year
    #[arg(short = 'u', long, value_name = "UNIT")]
    pub unit: Option<String>,

    /// Start of the range (ISO 8601 or relative like "3 months ago")
    #[arg(short = 'S', long = "since", value_name = "DATE")]
    pub since: Option<String>,

    /// End of the range (ISO 8601 or relative, defaults to now)
    #[arg(short = 'U', long = "until", value_name = "DATE")]
    pub until: Option<String>,

    /// Report format: summary or json
    #[arg(short = 'f', long, value_name = "FORMAT", default_value = "summary")]
    pub format: String,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,
}

pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Reject flag combinations and values clap cannot check on its own
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags = [args.verbose, args.quiet, args.debug].iter().filter(|&&flag| flag).count();
    if log_flags > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {}
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Valid options: text, json",
                args.log_format
            ))
        }
    }

    if let Some(level) = &args.log_file_level {
        crate::logging::parse_log_level(level)?;
        if args.log_file.is_none() {
            return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
        }
    }

    args.format.parse::<ReportFormat>().map_err(|e| anyhow::anyhow!(e))?;

    if let Some(unit) = &args.unit {
        unit.parse::<TimeUnit>()?;
    }

    if matches!(&args.login, Some(login) if login.trim().is_empty()) {
        return Err(anyhow::anyhow!("--login must not be empty"));
    }

    Ok(())
}
