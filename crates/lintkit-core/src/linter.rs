//! Runs a set of configured rules over source trees.

use crate::config::{Config, ConfigError};
use crate::context::CreateContext;
use crate::dispatch::{dispatch, DispatchError, RuleRun};
use crate::options::{resolve_options, OptionsError, ResolvedOptions};
use crate::rule::{Rule, RuleBox, RuleError};
use crate::types::{LintResult, Severity};
use lintkit_ast::{SchemaError, SourceTree};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building a linter or linting a tree.
#[derive(Debug, Error)]
pub enum LintError {
    /// A rule's options were rejected.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// A rule failed to build its handlers.
    #[error("rule `{rule}` failed to initialize: {source}")]
    Rule {
        /// Rule name.
        rule: String,
        /// Underlying error.
        source: RuleError,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input tree is malformed.
    #[error("Invalid tree: {0}")]
    Schema(#[from] SchemaError),

    /// A handler failed during traversal.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    options: HashMap<String, Vec<Value>>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Supplies option slots for a rule, taking precedence over the
    /// configuration's.
    #[must_use]
    pub fn options(mut self, rule: impl Into<String>, slots: Vec<Value>) -> Self {
        self.options.insert(rule.into(), slots);
        self
    }

    /// Builds the linter.
    ///
    /// Every enabled rule has its options resolved and its handlers built
    /// once here, so option and composition errors surface at registration.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule's options are rejected or its handlers
    /// cannot be built.
    pub fn build(mut self) -> Result<Linter, LintError> {
        let config = self.config.unwrap_or_default();
        let mut entries = Vec::with_capacity(self.rules.len());

        for rule in self.rules {
            let name = rule.name();
            if !config.is_rule_enabled(name) {
                debug!("Skipping disabled rule: {}", name);
                continue;
            }

            let supplied = match self.options.remove(name) {
                Some(slots) => slots,
                None => config.rule_options(name)?,
            };
            let options = resolve_options(rule.as_ref(), supplied)?;
            rule.create(&CreateContext::new(name, "<build>"), &options)
                .map_err(|source| LintError::Rule {
                    rule: name.to_string(),
                    source,
                })?;

            let severity = config
                .rule_severity(name)
                .unwrap_or_else(|| rule.default_severity());
            debug!(rule = name, %severity, slots = options.len(), "registered rule");
            entries.push(Entry {
                rule,
                options,
                severity,
            });
        }

        Ok(Linter {
            entries,
            fail_on: config.fail_on(),
        })
    }
}

struct Entry {
    rule: RuleBox,
    options: ResolvedOptions,
    severity: Severity,
}

/// Lints trees with a fixed set of rules.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    entries: Vec<Entry>,
    fail_on: Severity,
}

impl Linter {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the names of the enabled rules in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.rule.name())
    }

    /// Returns the configured failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on
    }

    /// Lints one tree.
    ///
    /// Every rule gets fresh handlers for the traversal; diagnostics are in
    /// emission order.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule cannot build its handlers or a handler
    /// fails.
    pub fn lint(&self, tree: &SourceTree, filename: &str) -> Result<LintResult, LintError> {
        info!("Linting {} ({} nodes)", filename, tree.len());

        let mut runs = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let name = entry.rule.name();
            let handlers = entry
                .rule
                .create(&CreateContext::new(name, filename), &entry.options)
                .map_err(|source| LintError::Rule {
                    rule: name.to_string(),
                    source,
                })?;
            runs.push(RuleRun {
                rule: name,
                messages: entry.rule.messages(),
                severity: entry.severity,
                options: &entry.options,
                handlers,
            });
        }

        let mut result = LintResult::new();
        dispatch(tree, filename, &mut runs, &mut result.diagnostics)?;
        result.files_checked = 1;

        info!(
            "Lint complete: {} diagnostic(s) in {}",
            result.diagnostics.len(),
            filename
        );
        Ok(result)
    }

    /// Parses an ESTree JSON document and lints it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid tree or linting fails.
    pub fn lint_json(&self, json: &str, filename: &str) -> Result<LintResult, LintError> {
        let tree = SourceTree::from_json(json)?;
        self.lint(&tree, filename)
    }
}
