//! Configuration system for the trade-off explainer.
//!
//! Load explainer configuration from TOML or YAML files to control the
//! default match mode, search budgets and certificate output without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tradeoff_config::ExplainerConfig;
//! use tradeoff_core::MatchMode;
//! use std::time::Duration;
//!
//! let config = ExplainerConfig::from_toml_str(r#"
//!     mode = "many_to_one"
//!
//!     [termination]
//!     seconds_spent_limit = 2
//!     step_count_limit = 100000
//! "#).unwrap();
//!
//! assert_eq!(config.mode, MatchMode::ManyToOne);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(2)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tradeoff_config::ExplainerConfig;
//!
//! let config = ExplainerConfig::load("explainer.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

mod dataset;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradeoff_core::{MatchMode, TradeoffError};

pub use dataset::Dataset;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for TradeoffError {
    fn from(err: ConfigError) -> Self {
        TradeoffError::Config(err.to_string())
    }
}

/// Main explainer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExplainerConfig {
    /// Environment mode affecting internal assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Mode used when the caller does not pick one.
    #[serde(default)]
    pub mode: MatchMode,

    /// Search budget applied to every `solve` call.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Certificate generation settings.
    #[serde(default)]
    pub certificate: CertificateConfig,
}

impl ExplainerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration, choosing TOML or YAML from the file extension.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default match mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the per-solve search node budget.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the wall-clock budget of certificate extraction.
    pub fn with_certificate_time_limit(mut self, limit: Duration) -> Self {
        self.certificate.seconds_spent_limit = None;
        self.certificate.milliseconds_spent_limit = Some(limit.as_millis() as u64);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the search node budget, if configured.
    pub fn step_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.step_count_limit)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.certificate.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "certificate.output_dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Environment mode affecting internal assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Solutions are verified; certificates are trusted.
    #[default]
    NonAsserted,

    /// Every certificate element is re-checked after deletion filtering.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Termination configuration, applied to each `solve` call separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend per search.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend per search.
    pub milliseconds_spent_limit: Option<u64>,

    /// Maximum number of search nodes per search.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.milliseconds_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Certificate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CertificateConfig {
    /// Whether infeasible comparisons are reduced to an irreducible
    /// certificate. When off, the certificate lists the whole instance.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory where certificate files are written, if any.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Maximum seconds for the whole deletion filter of one comparison.
    #[serde(default)]
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds for the whole deletion filter of one comparison.
    #[serde(default)]
    pub milliseconds_spent_limit: Option<u64>,
}

impl CertificateConfig {
    /// Wall-clock budget shared by every deletion probe, if any.
    ///
    /// Unlike the search budget, an explicit zero is kept: probes then stop
    /// at once and every element is kept unproven.
    pub fn time_limit(&self) -> Option<Duration> {
        match (self.seconds_spent_limit, self.milliseconds_spent_limit) {
            (None, None) => None,
            (seconds, millis) => Some(
                Duration::from_secs(seconds.unwrap_or(0))
                    + Duration::from_millis(millis.unwrap_or(0)),
            ),
        }
    }
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: None,
            seconds_spent_limit: None,
            milliseconds_spent_limit: None,
        }
    }
}

fn default_true() -> bool {
    true
}
