#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for suitecheck
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/suitecheck/config.toml)
//! - Environment variables (`MTS_ROOT`, `SUITECHECK_*`)
//! - CLI flags

pub mod constants;
pub mod layout;

pub use layout::SuiteLayout;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use suitecheck_errors::{ConfigError, Error};
use suitecheck_types::{ColorChoice, OutputFormat};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub suite: SuiteConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Suite distribution layout and expected metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Root of the unpacked suite; usually supplied through `MTS_ROOT`
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
    #[serde(default = "default_testcases_dir")]
    pub testcases_dir: String,
    #[serde(default = "default_tools_dir")]
    pub tools_dir: String,
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
    #[serde(default = "default_expected_name")]
    pub expected_name: String,
    #[serde(default = "default_expected_full_name")]
    pub expected_full_name: String,
}

/// Name filters and patterns used while scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_entry_suffix")]
    pub entry_suffix: String,
    #[serde(default = "default_list_marker")]
    pub list_marker: String,
    /// Entry names containing any of these substrings are never scanned
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<String>,
    #[serde(default = "default_filter_token")]
    pub filter_token: String,
    #[serde(default = "default_config_suffix")]
    pub config_suffix: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color_choice(),
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            root: None,
            dir_name: default_dir_name(),
            testcases_dir: default_testcases_dir(),
            tools_dir: default_tools_dir(),
            archive_name: default_archive_name(),
            expected_name: default_expected_name(),
            expected_full_name: default_expected_full_name(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            entry_suffix: default_entry_suffix(),
            list_marker: default_list_marker(),
            exclusions: default_exclusions(),
            filter_token: default_filter_token(),
            config_suffix: default_config_suffix(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_dir_name() -> String {
    "android-mts".to_string()
}

fn default_testcases_dir() -> String {
    "testcases".to_string()
}

fn default_tools_dir() -> String {
    "tools".to_string()
}

fn default_archive_name() -> String {
    "mts-tradefed.jar".to_string()
}

fn default_expected_name() -> String {
    "MTS".to_string()
}

fn default_expected_full_name() -> String {
    "Mainline Test Suite".to_string()
}

fn default_entry_suffix() -> String {
    ".xml".to_string()
}

fn default_list_marker() -> String {
    "tests-list".to_string()
}

fn default_exclusions() -> Vec<String> {
    vec!["bluetooth".to_string(), "bt".to_string(), "smoke".to_string()]
}

fn default_filter_token() -> String {
    "compatibility:include-filter".to_string()
}

fn default_config_suffix() -> String {
    ".config".to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded config file");

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// An empty `MTS_ROOT` counts as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // MTS_ROOT
        if let Ok(root) = std::env::var(constants::ROOT_ENV_VAR) {
            if !root.trim().is_empty() {
                self.suite.root = Some(PathBuf::from(root));
            }
        }

        // SUITECHECK_OUTPUT
        if let Ok(output) = std::env::var(constants::OUTPUT_ENV_VAR) {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: constants::OUTPUT_ENV_VAR.to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // SUITECHECK_COLOR
        if let Ok(color) = std::env::var(constants::COLOR_ENV_VAR) {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: constants::COLOR_ENV_VAR.to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Reject values that would make the scan meaningless
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for empty patterns or an empty
    /// exclusion marker, which would otherwise match every entry.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("scan.entry_suffix", &self.scan.entry_suffix),
            ("scan.list_marker", &self.scan.list_marker),
            ("scan.filter_token", &self.scan.filter_token),
            ("scan.config_suffix", &self.scan.config_suffix),
            ("suite.dir_name", &self.suite.dir_name),
            ("suite.archive_name", &self.suite.archive_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }

        if self.scan.exclusions.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "scan.exclusions".to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(())
    }

    /// Resolve the suite layout from the configured root
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no root was configured.
    pub fn layout(&self) -> Result<SuiteLayout, Error> {
        let root = self
            .suite
            .root
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: "suite.root".to_string(),
            })?;
        Ok(SuiteLayout::from_root(root, &self.suite))
    }
}
