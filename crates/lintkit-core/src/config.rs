//! Configuration types for lintkit.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// ```toml
/// preset = "recommended"
/// fail_on = "warning"
///
/// [rules.max-params]
/// severity = "warning"
/// options = [{ max = 4 }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "all").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for failure (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

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
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
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
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules without a section are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the supplied option slots for a rule as JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] if a slot cannot be expressed
    /// as JSON.
    pub fn rule_options(&self, rule_name: &str) -> Result<Vec<Value>, ConfigError> {
        self.rules
            .get(rule_name)
            .map_or_else(|| Ok(Vec::new()), |c| c.json_options(rule_name))
    }

    /// Returns the failure threshold, defaulting to [`Severity::Error`].
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Positional option slots.
    #[serde(default)]
    pub options: Vec<toml::Value>,
}

impl RuleConfig {
    /// Converts the option slots to JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] if a slot cannot be expressed
    /// as JSON.
    pub fn json_options(&self, rule_name: &str) -> Result<Vec<Value>, ConfigError> {
        self.options
            .iter()
            .map(|slot| {
                serde_json::to_value(slot).map_err(|source| ConfigError::InvalidOptions {
                    rule: rule_name.to_string(),
                    source,
                })
            })
            .collect()
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

    /// A rule's options could not be converted to JSON.
    #[error("Invalid options for rule `{rule}`: {source}")]
    InvalidOptions {
        /// Rule name.
        rule: String,
        /// Conversion error.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("max-params"));
        assert_eq!(config.fail_on(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[rules.max-params]
severity = "warning"
options = [{ max = 4, countVoidThis = true }]

[rules.no-unused-expressions]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on(), Severity::Warning);
        assert!(config.is_rule_enabled("max-params"));
        assert!(!config.is_rule_enabled("no-unused-expressions"));
        assert_eq!(config.rule_severity("max-params"), Some(Severity::Warning));
        assert_eq!(
            config.rule_options("max-params").expect("options"),
            [json!({"max": 4, "countVoidThis": true})]
        );
        assert!(config.rule_options("unknown").expect("options").is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("rules = 3").expect_err("must fail");
        assert!(err.to_string().starts_with("Failed to parse config:"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[rules.max-params]\noptions = [2]").expect("write");
        let config = Config::from_file(file.path()).expect("load");
        assert_eq!(config.rule_options("max-params").expect("options"), [json!(2)]);

        let missing = file.path().with_extension("missing");
        let err = Config::from_file(&missing).expect_err("must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
