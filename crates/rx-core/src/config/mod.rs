//! Configuration management for rancherexec
//!
//! Settings come from, in increasing precedence: built-in defaults, the first
//! config file found on the search path, `RANCHER_*` environment variables
//! and command-line flags. Environment and flags are merged by the CLI and
//! arrive here as [`ConfigOverrides`].

mod exec;

pub use exec::{ConfigOverrides, ExecConfig};

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Per-user configuration directory name (under `$HOME`)
pub const USER_CONFIG_DIR: &str = ".rancherexec";

/// System-wide configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/rancherexec";

/// Config file names tried in each search directory, in order
pub const CONFIG_FILE_NAMES: [&str; 4] = ["config.toml", "config.json", "config.yml", "config.yaml"];

/// Directories searched for a config file, in order
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join(USER_CONFIG_DIR));
    }
    dirs.push(PathBuf::from(SYSTEM_CONFIG_DIR));
    dirs
}

/// Find the first config file on the default search path
pub fn find_config_file() -> Option<PathBuf> {
    find_config_in(&config_search_dirs())
}

/// Find the first config file in the given directories
///
/// Directories are searched in order, and within a directory the names of
/// [`CONFIG_FILE_NAMES`] are tried in order, so an earlier directory always
/// wins over a later one regardless of format.
///
/// # Arguments
/// * `dirs` - Directories to search, highest priority first
///
/// # Returns
/// The path of the first regular file found, or `None` if no directory
/// contains a config file.
pub fn find_config_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Load configuration from a file, choosing the format by extension
///
/// `.toml` is parsed with `toml`, `.json` with `serde_json`, and `.yml` or
/// `.yaml` with `serde_yaml`. Fields missing from the file take the type's
/// defaults when it is `#[serde(default)]`.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// The deserialized configuration, or a [`ConfigError`] if the file is
/// missing, unreadable, of an unknown format or malformed.
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load the effective file configuration
///
/// An explicit path must exist. Without one the search path is used, and
/// finding nothing yields the defaults.
pub fn load_exec_config(explicit: Option<&Path>) -> Result<ExecConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => {
                tracing::debug!("No config file found, using defaults");
                return Ok(ExecConfig::default());
            }
        },
    };

    tracing::debug!("Loading config from {:?}", path);
    load_config(&path)
}
