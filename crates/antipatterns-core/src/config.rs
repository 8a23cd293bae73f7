//! Configuration types for antipatterns.

use crate::analyzer::Traversal;
use crate::platform::Platform;
use crate::types::{FindingKind, Priority};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Priority threshold for a failing exit status (default: "high").
    #[serde(default)]
    pub fail_on: Option<Priority>,

    /// Finding kinds to drop from results, by identifier or bug code.
    #[serde(default)]
    pub suppress: Vec<String>,

    /// Platform type names.
    #[serde(default)]
    pub platform: Platform,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown finding
    /// kind under `suppress`.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.suppressed_kinds()?;
        Ok(config)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the priority override for a rule.
    #[must_use]
    pub fn rule_priority(&self, rule_name: &str) -> Option<Priority> {
        self.rules.get(rule_name).and_then(|c| c.priority)
    }

    /// Resolves the `suppress` list to finding kinds.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown kind name.
    pub fn suppressed_kinds(&self) -> Result<Vec<FindingKind>, ConfigError> {
        self.suppress
            .iter()
            .map(|name| {
                FindingKind::from_name(name).ok_or_else(|| ConfigError::Parse {
                    message: format!("unknown finding kind `{name}` in suppress"),
                })
            })
            .collect()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// How supplied classes are traversed.
    #[serde(default)]
    pub traversal: Traversal,

    /// Whether to add the bundled platform types to the class path.
    #[serde(default = "default_true")]
    pub platform_types: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            traversal: Traversal::default(),
            platform_types: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Priority override for this rule.
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string array option, or `None` if the key is absent.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Option<Vec<String>> {
        self.options.get(key).and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
