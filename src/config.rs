//! User configuration, stored in `~/.stegim/config.toml`.
//!
//! ```toml
//! log_level = "info"
//!
//! [hide]
//! backup = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Settings for the `hide` command.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HideConfig {
    /// Copy the cover to `<stem>.orig.<ext>` before overwriting it in place.
    pub backup: bool,
}

/// The configuration file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when neither `--verbose` nor `--quiet` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    pub hide: HideConfig,
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file (or home directory) yields the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Ok(path) if path.exists() => Self::load_from(&path),
                Ok(_) | Err(ConfigError::NoConfigDir) => Ok(Self::default()),
                Err(e) => Err(e),
            },
        }
    }

    /// Parses the configuration file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the path to the default configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }
}

/// Get the stegim config directory (`~/.stegim`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".stegim"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Where the untouched cover is copied before an in-place hide.
///
/// `photos/cat.png` becomes `photos/cat.orig.png`.
pub fn backup_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match image.extension() {
        Some(ext) => format!("{stem}.orig.{}", ext.to_string_lossy()),
        None => format!("{stem}.orig"),
    };
    image.with_file_name(name)
}
