//! TOML configuration
//!
//! Files are flattened into named sections of string values. Lookups fall
//! back from the section selected with `--config-name`, to the requested
//! section, to `[base]`.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};
use toml::Value;

use crate::stats::interval::TimeUnit;

/// section name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

pub const BASE_SECTION: &str = "base";
pub const CONFIG_ENV_VAR: &str = "GHSTATS_CONFIG";

pub struct ConfigManager {
    config: Configuration,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            selected_section: None,
        }
    }

    /// Load the first configuration file found on the discovery path
    pub fn load() -> Result<Self> {
        for path in discover_config_files() {
            if path.exists() {
                return Self::load_from_file(path);
            }
            debug!("No configuration at {}", path.display());
        }
        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(Self::from_config(config))
    }

    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        let lookup = |name: &str| self.config.get(name).and_then(|s| s.get(key));
        self.selected_section
            .as_deref()
            .and_then(lookup)
            .or_else(|| lookup(section))
            .or_else(|| lookup(BASE_SECTION))
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        self.get_value(section, key)
            .map(|value| crate::logging::parse_log_level(value))
            .transpose()
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    pub fn get_unit(&self, section: &str, key: &str) -> Result<Option<TimeUnit>> {
        self.get_value(section, key)
            .map(|value| {
                value
                    .parse::<TimeUnit>()
                    .with_context(|| format!("Invalid unit for {}.{}", section, key))
            })
            .transpose()
    }
}

/// Candidate files, highest precedence first
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("ghstats").join("config.toml"));
    }
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".ghstats.toml"));
    }
    paths.push(PathBuf::from("./.ghstats.toml"));
    paths
}

fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse().context("Failed to parse TOML content")?;
    let mut config = Configuration::new();
    flatten_table(&table, "", &mut config);
    Ok(config)
}

// Nested tables become dotted section names, `[report.weekly]` -> "report.weekly".
// Scalars at the top level land in `[base]`.
fn flatten_table(table: &toml::Table, prefix: &str, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_table(subtable, &name, config);
            }
            _ => {
                let section = if prefix.is_empty() { BASE_SECTION } else { prefix };
                config
                    .entry(section.to_string())
                    .or_default()
                    .insert(key.clone(), value_to_string(value));
            }
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
