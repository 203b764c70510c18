//! Writing configuration files.
//!
//! # Configuration File Format
//!
//! ```toml
//! [databases]
//! include_builtin = true
//!
//! [databases.labels]
//! local1 = "Local Archive"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [output]
//! title_width = 60
//! max_facet_values = 5
//! ```

use std::path::Path;

use super::Config;

/// Serialize `config` as TOML and write it to `path`, creating parent directories
pub fn write_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    tracing::info!("Wrote configuration to {}", path.display());
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
