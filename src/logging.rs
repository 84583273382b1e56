//! Diagnostic logging
//!
//! A `log` backend writing text or JSON lines to stderr, a file, or both.
//! Console and file output have independent level thresholds. Report output
//! never goes through this logger.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    fn file_path(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path.as_path()),
        }
    }

    fn has_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Warn,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination accepts
    pub fn max_level(&self) -> LevelFilter {
        let file_level = match self.destination.file_path() {
            Some(_) => self.file_level.unwrap_or(self.console_level),
            None => LevelFilter::Off,
        };
        let console_level = if self.destination.has_console() {
            self.console_level
        } else {
            LevelFilter::Off
        };
        console_level.max(file_level)
    }
}

pub struct GhstatsLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl GhstatsLogger {
    /// Build a logger, opening the log file in append mode if one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = match config.destination.file_path() {
            Some(path) => Some(Mutex::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?,
            )),
            None => None,
        };
        Ok(Self { config, file })
    }

    fn format_record(&self, level: Level, target: &str, message: &str) -> String {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        match self.config.format {
            LogFormat::Text => format!("{} [{}] {}", timestamp, level, message),
            LogFormat::Json => {
                let entry = JsonLogEntry {
                    timestamp,
                    level: level.to_string(),
                    target: target.to_string(),
                    message: message.to_string(),
                };
                serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
            }
        }
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.destination.has_console() && level <= self.config.console_level
    }

    fn file_accepts(&self, level: Level) -> bool {
        self.file.is_some() && level <= self.config.file_level.unwrap_or(self.config.console_level)
    }
}

impl Log for GhstatsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console_accepts(metadata.level()) || self.file_accepts(metadata.level())
    }

    fn log(&self, record: &Record) {
        let level = record.level();
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(level, record.target(), &record.args().to_string());
        if self.console_accepts(level) {
            let _ = writeln!(io::stderr(), "{}", line);
        }
        if self.file_accepts(level) {
            if let Some(file) = &self.file {
                if let Ok(mut file) = file.lock() {
                    if writeln!(file, "{}", line).is_err() {
                        let _ = writeln!(io::stderr(), "{}", line);
                    }
                }
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the global logger
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = GhstatsLogger::new(config)?;
    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(max_level);
    Ok(())
}

pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level
        )
    })
}
