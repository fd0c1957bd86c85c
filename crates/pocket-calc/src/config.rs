//! Application configuration
//!
//! Loaded from an optional YAML file, then overridden by command-line flags.
//!
//! ```yaml
//! theme: deep-ocean
//! persist: true
//! grouping: ","
//! log_level: debug
//! data_dir: /home/me/.local/share/pocket-calc
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::DEFAULT_SEPARATOR;
use crate::theme::Theme;

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "pocket-calc";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Config file is not valid YAML for [`AppConfig`]
    #[error("Failed to parse config {path}: {source}")]
    Yaml {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_yaml_ng::Error,
    },
    /// A value parsed but makes no sense
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where history and theme are stored; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Theme used when nothing is stored yet
    pub theme: String,
    /// Load and save state between runs
    pub persist: bool,
    /// Thousands separator
    pub grouping: char,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            theme: Theme::default_theme().id.to_string(),
            persist: true,
            grouping: DEFAULT_SEPARATOR,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|e| match e {
            ConfigError::Yaml { source, .. } => ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parses configuration from YAML text; missing keys take defaults
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text).map_err(|source| ConfigError::Yaml {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grouping.is_ascii_digit() || self.grouping == '.' || self.grouping == '-' {
            return Err(ConfigError::invalid(format!(
                "grouping separator {:?} would be ambiguous",
                self.grouping
            )));
        }
        Ok(())
    }

    /// Set data directory
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set theme id
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set persistence
    #[must_use]
    pub const fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set thousands separator
    #[must_use]
    pub const fn with_grouping(mut self, grouping: char) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Resolves the storage directory
    ///
    /// Returns `None` when no directory is configured and the platform has
    /// no data directory.
    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR_NAME)))
    }

    /// Theme to fall back to when storage has none
    #[must_use]
    pub fn default_theme(&self) -> &'static Theme {
        Theme::find_or_default(&self.theme)
    }
}
