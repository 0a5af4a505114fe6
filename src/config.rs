use crate::core::db::{ConnectOptions, DEFAULT_SCHEME};
use crate::core::{Result, StudentDbError};
use crate::output::Palette;
use crate::results_grid::OutputFormat;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "STUDENTDB_CONFIG";

const CONFIG_DIR: &str = "studentdb";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section and field is optional; anything left out falls back to the
/// built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub output: OutputConfig,
    pub demo: DemoConfig,
}

/// Driver selection and connect behaviour.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub scheme: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

/// Console output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: Option<bool>,
    pub format: Option<String>,
}

/// Values used by the demo operation sequence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Quoted `YYYY-MM-DD`; today when absent
    pub enrollment_date: Option<NaiveDate>,
    /// Row to update and delete; the freshly inserted row when absent
    pub target_id: Option<i32>,
    pub new_email: Option<String>,
}

impl Config {
    pub fn scheme(&self) -> &str {
        self.connection.scheme.as_deref().unwrap_or(DEFAULT_SCHEME)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: self.connection.connect_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::from_settings(self.output.color.unwrap_or(true))
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        match &self.output.format {
            Some(format) => OutputFormat::parse(format),
            None => Ok(OutputFormat::Table),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        StudentDbError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&content)
        .map_err(|e| StudentDbError::Config(format!("{}: {}", path.display(), e)))
}

fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Finds the config file to use, if any.
///
/// `$STUDENTDB_CONFIG` wins when set, even if the file is missing, so a typo
/// surfaces as an error instead of silently using defaults. Otherwise the
/// per-user config directory is consulted.
pub fn locate_config() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    let path = dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    path.exists().then_some(path)
}

/// Loads the located config file, or the defaults when there is none.
pub fn load() -> Result<Config> {
    match locate_config() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(path)
        }
        None => Ok(Config::default()),
    }
}
