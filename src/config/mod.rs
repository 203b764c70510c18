//! Configuration management.
//!
//! Settings come from an optional TOML file and `EDS_RESULTS_*` environment
//! variables, the latter taking precedence. Nested keys use a double
//! underscore, e.g. `EDS_RESULTS_LOGGING__LEVEL=debug`.

mod file_config;

pub use file_config::{write_config, ConfigError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "eds-results.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EDS_RESULTS";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database label settings
    #[serde(default)]
    pub databases: DatabaseConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Database label table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Whether to start from the labels shipped with the crate
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Extra labels keyed by database code; these override built-in labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            labels: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for structured output, anything else for human-readable
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON logs were requested
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum width of titles in table output
    #[serde(default = "default_title_width")]
    pub title_width: usize,

    /// Maximum number of values shown per facet in table output
    #[serde(default = "default_facet_values")]
    pub max_facet_values: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title_width: default_title_width(),
            max_facet_values: default_facet_values(),
        }
    }
}

fn default_title_width() -> usize {
    60
}

fn default_facet_values() -> usize {
    5
}

/// Load configuration from a file, applying environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Get configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(env_source())
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Serializes tests that read or set `EDS_RESULTS_*` variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Find a configuration file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}

/// Location of the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("eds-results").join("config.toml"))
}
