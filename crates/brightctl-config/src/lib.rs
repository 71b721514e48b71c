//! Configuration management for brightctl
//!
//! Handles the optional TOML configuration file and the resolution of the
//! state directory used to remember the last brightness.
//!
//! ```toml
//! backlight_dir = "/sys/class/backlight"
//! state_home = "/var/lib/brightctl-state"
//! ```

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Application directory name under config and state roots
pub const APP_NAME: &str = "brightctl";

/// System-wide configuration directory
pub const CONFIG_DIR: &str = "/etc/brightctl";

/// Configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Default base directory for backlight devices
pub const DEFAULT_BACKLIGHT_DIR: &str = "/sys/class/backlight";

/// Environment variable naming the state root
pub const STATE_HOME_ENV: &str = "XDG_STATE_HOME";

/// brightctl configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrightctlConfig {
    /// Directory holding backlight device directories
    pub backlight_dir: PathBuf,

    /// State root overriding `$XDG_STATE_HOME`; empty counts as unset
    pub state_home: Option<PathBuf>,
}

impl Default for BrightctlConfig {
    fn default() -> Self {
        Self {
            backlight_dir: PathBuf::from(DEFAULT_BACKLIGHT_DIR),
            state_home: None,
        }
    }
}

impl BrightctlConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Candidate configuration files, user file first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_NAME).join(CONFIG_FILE));
        }
        paths.push(Path::new(CONFIG_DIR).join(CONFIG_FILE));
        paths
    }

    /// State root from the configuration, the environment or the home directory
    ///
    /// `None` means persistence has to be skipped.
    pub fn state_root(&self) -> Option<PathBuf> {
        if let Some(dir) = self
            .state_home
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            return Some(dir.clone());
        }

        resolve_state_root(std::env::var_os(STATE_HOME_ENV), dirs::home_dir())
    }
}

/// Resolve the state root from `$XDG_STATE_HOME` and the home directory
///
/// An empty variable counts as unset, following the XDG base directory rules.
pub fn resolve_state_root(state_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match state_home {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home.map(|home| home.join(".local").join("state")),
    }
}
