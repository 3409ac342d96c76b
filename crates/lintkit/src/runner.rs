//! Config-driven entry points: find `lintkit.toml`, pick the preset, lint a
//! serialized tree.

use lintkit_ast::SourceTree;
use lintkit_core::{Config, ConfigError, LintError, LintResult, Linter, RuleBox};
use lintkit_rules::{rule_by_name, Preset, UnknownPreset};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["lintkit.toml", ".lintkit.toml"];

/// Errors from the config-driven entry points.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured preset does not exist.
    #[error(transparent)]
    Preset(#[from] UnknownPreset),

    /// A `[rules.<name>]` section names no known rule.
    #[error("unknown rule `{0}` in configuration")]
    UnknownRule(String),

    /// Building the linter or linting failed.
    #[error(transparent)]
    Lint(#[from] LintError),

    /// Diagnostics at or above the failure threshold were found.
    #[error("{report}")]
    Failed {
        /// Number of failing diagnostics.
        count: usize,
        /// Formatted report of the failing diagnostics.
        report: String,
    },
}

/// Looks for a config file in `start` and its ancestors.
#[must_use]
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Loads the nearest config file above `start`, or the default
/// configuration when there is none.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_config(start: &Path) -> Result<Config, RunError> {
    match find_config(start) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Ok(Config::from_file(&path)?)
        }
        None => {
            debug!("No config file found from {}", start.display());
            Ok(Config::default())
        }
    }
}

/// Resolves the configured preset. Defaults to recommended.
///
/// # Errors
///
/// Returns an error if the preset name is unknown.
pub fn resolve_preset(config: &Config) -> Result<Preset, RunError> {
    Ok(config
        .preset
        .as_deref()
        .map_or(Ok(Preset::Recommended), str::parse::<Preset>)?)
}

/// Builds a linter from the preset's rules plus every rule with its own
/// `[rules.<name>]` section.
///
/// # Errors
///
/// Returns an error if the preset or a configured rule is unknown, or if a
/// rule's options are rejected.
pub fn linter_from_config(config: &Config) -> Result<Linter, RunError> {
    let preset = resolve_preset(config)?;
    let mut rules: Vec<RuleBox> = preset.rules();

    let mut configured: Vec<&String> = config.rules.keys().collect();
    configured.sort();
    for name in configured {
        if rules.iter().any(|rule| rule.name() == name.as_str()) {
            continue;
        }
        let rule = rule_by_name(name).ok_or_else(|| RunError::UnknownRule(name.clone()))?;
        rules.push(rule);
    }

    info!("Using preset {} with {} rule(s)", preset, rules.len());
    Ok(Linter::builder()
        .rules(rules)
        .config(config.clone())
        .build()?)
}

/// Lints an ESTree JSON document with the configured rules.
///
/// # Errors
///
/// Returns an error if the linter cannot be built, the document is not a
/// valid tree, or a rule fails.
pub fn lint_json(json: &str, filename: &str, config: &Config) -> Result<LintResult, RunError> {
    let linter = linter_from_config(config)?;
    let tree = SourceTree::from_json(json).map_err(LintError::from)?;
    Ok(linter.lint(&tree, filename)?)
}

/// Like [`lint_json`], but fails when any diagnostic reaches the configured
/// `fail_on` severity.
///
/// # Errors
///
/// Returns [`RunError::Failed`] with a formatted report on failing
/// diagnostics, or any error of [`lint_json`].
pub fn check_json(json: &str, filename: &str, config: &Config) -> Result<LintResult, RunError> {
    let result = lint_json(json, filename, config)?;
    let fail_on = config.fail_on();
    if result.has_diagnostics_at(fail_on) {
        let count = result
            .diagnostics
            .iter()
            .filter(|d| d.severity >= fail_on)
            .count();
        return Err(RunError::Failed {
            count,
            report: result.format_report(fail_on),
        });
    }
    Ok(result)
}
