//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the user file and the project file; values
//! set in the project file override the user file key by key.
//!
//! # Validation
//!
//! Values are validated after parsing: `log_filter` must be a valid
//! `tracing` filter directive.

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigWarning};
use crate::core::types::Layout;

/// Contents of a config file.
///
/// # Example
///
/// ```toml
/// layout = "wide"
/// log_filter = "kiroku_nav=debug"
///
/// [output]
/// json = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Layout assumed when none is given on the command line
    pub layout: Option<Layout>,

    /// `tracing` filter directive
    pub log_filter: Option<String>,

    /// Output defaults
    pub output: Option<OutputConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// Returns non-fatal findings as warnings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `log_filter` does not parse.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                warnings.push("log_filter is empty and will be ignored".to_string());
            } else {
                tracing_subscriber::EnvFilter::try_new(filter).map_err(|e| {
                    ConfigError::InvalidValue(format!("invalid log_filter '{filter}': {e}"))
                })?;
            }
        }

        Ok(warnings)
    }

    /// Overlay `other` on top of `self`, key by key.
    pub fn merged(&self, other: &FileConfig) -> FileConfig {
        let output = match (&self.output, &other.output) {
            (Some(base), Some(over)) => Some(OutputConfig {
                json: over.json.or(base.json),
            }),
            (base, over) => over.clone().or_else(|| base.clone()),
        };

        FileConfig {
            layout: other.layout.or(self.layout),
            log_filter: other
                .log_filter
                .clone()
                .or_else(|| self.log_filter.clone()),
            output,
        }
    }

    pub(super) fn warn(&self, path: &std::path::Path) -> Result<Vec<ConfigWarning>, ConfigError> {
        Ok(self
            .validate()?
            .into_iter()
            .map(|message| ConfigWarning {
                message,
                path: path.to_path_buf(),
            })
            .collect())
    }
}

/// Output defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Print machine-readable JSON
    pub json: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod file_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = FileConfig::default();
            assert!(config.layout.is_none());
            assert!(config.log_filter.is_none());
            assert!(config.output.is_none());
        }

        #[test]
        fn parses_layout() {
            let config: FileConfig = toml::from_str("layout = \"wide\"").unwrap();
            assert_eq!(config.layout, Some(Layout::Wide));
        }

        #[test]
        fn rejects_unknown_layout() {
            let result: Result<FileConfig, _> = toml::from_str("layout = \"tablet\"");
            assert!(result.is_err());
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                layout = "narrow"
                unknown_field = true
            "#;

            let result: Result<FileConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }

        #[test]
        fn roundtrip() {
            let config = FileConfig {
                layout: Some(Layout::Wide),
                log_filter: Some("kiroku_nav=debug".to_string()),
                output: Some(OutputConfig { json: Some(true) }),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: FileConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn empty_filter_warns() {
            let config = FileConfig {
                log_filter: Some("  ".to_string()),
                ..Default::default()
            };
            assert_eq!(config.validate().unwrap().len(), 1);
        }

        #[test]
        fn valid_filter_accepted() {
            let config = FileConfig {
                log_filter: Some("kiroku_nav=trace,warn".to_string()),
                ..Default::default()
            };
            assert!(config.validate().unwrap().is_empty());
        }

        #[test]
        fn invalid_filter_rejected() {
            let config = FileConfig {
                log_filter: Some("kiroku_nav=loud".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    mod merge {
        use super::*;

        #[test]
        fn later_file_wins_per_key() {
            let user = FileConfig {
                layout: Some(Layout::Wide),
                log_filter: Some("warn".to_string()),
                output: Some(OutputConfig { json: Some(true) }),
            };
            let project = FileConfig {
                layout: Some(Layout::Narrow),
                output: Some(OutputConfig { json: None }),
                ..Default::default()
            };

            let merged = user.merged(&project);
            assert_eq!(merged.layout, Some(Layout::Narrow));
            assert_eq!(merged.log_filter.as_deref(), Some("warn"));
            assert_eq!(merged.output.unwrap().json, Some(true));
        }
    }
}
