//! Configuration loading and logger setup

use std::str::FromStr;

use anyhow::Result;
use log::{debug, LevelFilter};

use crate::config::{ConfigManager, BASE_SECTION};
use crate::{cli, logging};

pub fn load_configuration(args: &cli::Args) -> Result<ConfigManager> {
    let mut manager = match &args.config_file {
        Some(config_file) => ConfigManager::load_from_file(config_file.clone())?,
        None => ConfigManager::load()?,
    };
    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }
    Ok(manager)
}

/// Build the logger configuration
///
/// Command line flags win over the configuration file, which wins over the
/// defaults (warnings on the console, no file).
pub fn configure_logging(args: &cli::Args, config: &ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level(BASE_SECTION, "console-level")?
            .unwrap_or(LevelFilter::Warn)
    };

    let format = if args.log_format.eq_ignore_ascii_case("text") {
        match config.get_value(BASE_SECTION, "log-format") {
            Some(value) => logging::LogFormat::from_str(value).map_err(|e| anyhow::anyhow!(e))?,
            None => logging::LogFormat::Text,
        }
    } else {
        logging::LogFormat::from_str(&args.log_format).map_err(|e| anyhow::anyhow!(e))?
    };

    let log_file = args.log_file.clone().or_else(|| config.get_path(BASE_SECTION, "log-file"));
    let file_level = match &args.log_file_level {
        Some(level) => Some(logging::parse_log_level(level)?),
        None => config.get_log_level(BASE_SECTION, "log-file-level")?,
    };

    let destination = match log_file {
        Some(path) => {
            debug!("File logging enabled: {}", path.display());
            logging::LogDestination::Both(path)
        }
        None => logging::LogDestination::Console,
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}
