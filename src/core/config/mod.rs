//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! kiroku-nav has two configuration scopes:
//! - **User**: personal defaults
//! - **Project**: overrides checked in next to the app
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # User Config Locations
//!
//! Searched in order:
//! 1. `$KIROKU_NAV_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/kiroku-nav/config.toml`
//! 3. `~/.kiroku-nav/config.toml`
//!
//! # Project Config Location
//!
//! `.kiroku-nav.toml` in the working directory.
//!
//! # Example
//!
//! ```no_run
//! use kiroku_nav::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/app"))).unwrap();
//! let config = result.config;
//!
//! println!("Layout: {}", config.layout());
//! println!("JSON output: {}", config.json_output());
//! ```

pub mod schema;

pub use schema::{FileConfig, OutputConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Layout;

/// Name of the project config file.
pub const PROJECT_FILE: &str = ".kiroku-nav.toml";

/// Filter used when neither the environment, a flag nor a file sets one.
pub const DEFAULT_LOG_FILTER: &str = "kiroku_nav=warn";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to render configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: project over user over defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User configuration
    pub user: FileConfig,
    /// Project configuration (if present)
    pub project: Option<FileConfig>,
    user_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads the project file there.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed or
    /// validated. Missing config files are not an error (defaults are used).
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(Self::find_user_config(), project_dir)
    }

    /// Load configuration from an explicit user file.
    pub fn load_from(
        user_file: Option<PathBuf>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (user, user_path) = match user_file {
            Some(path) if path.exists() => {
                let config = Self::read_config(&path)?;
                warnings.extend(config.warn(&path)?);
                (config, Some(path))
            }
            _ => (FileConfig::default(), None),
        };

        let (project, project_path) = match project_dir.map(|dir| dir.join(PROJECT_FILE)) {
            Some(path) if path.exists() => {
                let config = Self::read_config(&path)?;
                warnings.extend(config.warn(&path)?);
                (Some(config), Some(path))
            }
            _ => (None, None),
        };

        Ok(ConfigLoadResult {
            config: Config {
                user,
                project,
                user_path,
                project_path,
            },
            warnings,
        })
    }

    /// Locate the user config file.
    fn find_user_config() -> Option<PathBuf> {
        // 1. Check $KIROKU_NAV_CONFIG
        if let Ok(path) = std::env::var("KIROKU_NAV_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/kiroku-nav/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("kiroku-nav/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.kiroku-nav/config.toml
        dirs::home_dir()
            .map(|home| home.join(".kiroku-nav/config.toml"))
            .filter(|path| path.exists())
    }

    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The effective file-level configuration.
    pub fn effective(&self) -> FileConfig {
        match &self.project {
            Some(project) => self.user.merged(project),
            None => self.user.clone(),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.effective())?)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Layout to plan for.
    ///
    /// Defaults to narrow if not configured.
    pub fn layout(&self) -> Layout {
        self.effective().layout.unwrap_or_default()
    }

    /// Configured log filter, if any non-empty one is set.
    pub fn log_filter(&self) -> Option<String> {
        self.effective()
            .log_filter
            .filter(|filter| !filter.trim().is_empty())
    }

    /// Check if JSON output is the default.
    ///
    /// Defaults to `false` if not configured.
    pub fn json_output(&self) -> bool {
        self.effective()
            .output
            .and_then(|output| output.json)
            .unwrap_or(false)
    }

    /// Get the path to the loaded user config file.
    pub fn user_config_loaded_from(&self) -> Option<&Path> {
        self.user_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
