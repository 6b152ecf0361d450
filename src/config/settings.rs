use crate::error::{LedgerError, Result};
use log::Level;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::str::FromStr;

const REJECTION_LOG_LEVEL_KEY: &str = "LEDGER_REJECTION_LOG_LEVEL";
const RECORD_REJECTIONS_KEY: &str = "LEDGER_RECORD_REJECTIONS";

/// Settings for a [`crate::core::TxHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Level at which each dropped candidate is logged
    pub rejection_log_level: Level,
    /// Whether `settle_epoch` keeps the reason for each dropped candidate
    pub record_rejections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rejection_log_level: Level::Debug,
            record_rejections: true,
        }
    }
}

// Same keys as the environment, lowercased, e.g.
//
//   rejection_log_level = "info"
//   record_rejections = false
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rejection_log_level: Option<String>,
    record_rejections: Option<bool>,
}

impl Config {
    /// Defaults, overridden by `LEDGER_REJECTION_LOG_LEVEL` and `LEDGER_RECORD_REJECTIONS`.
    pub fn new() -> Result<Config> {
        let mut config = Config::default();
        if let Ok(level) = env::var(REJECTION_LOG_LEVEL_KEY) {
            config.rejection_log_level = parse_level(&level)?;
        }
        if let Ok(flag) = env::var(RECORD_REJECTIONS_KEY) {
            config.record_rejections = parse_bool(&flag)?;
        }
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Config::default();
        if let Some(level) = file.rejection_log_level {
            config.rejection_log_level = parse_level(&level)?;
        }
        if let Some(flag) = file.record_rejections {
            config.record_rejections = flag;
        }
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

fn parse_level(value: &str) -> Result<Level> {
    Level::from_str(value.trim())
        .map_err(|_| LedgerError::Config(format!("Invalid log level: {value}")))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(LedgerError::Config(format!("Invalid boolean: {value}"))),
    }
}
