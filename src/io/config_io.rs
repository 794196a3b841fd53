use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::TodoConfig;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".todoplus.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Read the config file; a missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<TodoConfig, ConfigError> {
    if !path.exists() {
        return Ok(TodoConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the config back to disk (used by the timer toggle)
pub fn write_config(path: &Path, config: &TodoConfig) -> Result<(), ConfigError> {
    let text = toml::to_string(config)?;
    fs::write(path, text).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
