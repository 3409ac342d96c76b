//! The rule trait and rule metadata.

use crate::context::CreateContext;
use crate::dispatch::Selector;
use crate::handler::HandlerMap;
use crate::options::{OptionsError, ResolvedOptions};
use crate::schema::RuleSchema;
use crate::types::Severity;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by rules while being created or while handling a node.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A wrapper names a selector the wrapped map does not handle.
    #[error("cannot wrap `{selector}`: the base rule has no handler for it")]
    MissingBaseHandler {
        /// The selector the wrapper expected.
        selector: Selector,
    },

    /// A report used a message id absent from the rule's message table.
    #[error("unknown message id `{message_id}`")]
    UnknownMessageId {
        /// The offending id.
        message_id: String,
    },

    /// The rule's options could not be read.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The rule's own logic failed.
    #[error("{0}")]
    Failed(String),
}

/// What kind of problem a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Code that is or will likely cause an error.
    Problem,
    /// Code that could be written in a better way.
    Suggestion,
    /// Formatting only.
    Layout,
}

/// Static description of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Problem category.
    pub rule_type: RuleType,
    /// One-line summary.
    pub description: &'static str,
    /// Part of the recommended preset.
    pub recommended: bool,
    /// The rule is built by wrapping a base rule's handlers.
    pub extends_base_rule: bool,
    /// The rule is kept for compatibility only.
    pub deprecated: bool,
    /// The rule may attach suggestions to its diagnostics.
    pub has_suggestions: bool,
}

impl RuleMeta {
    /// Metadata with the given type and description and all flags unset.
    #[must_use]
    pub const fn new(rule_type: RuleType, description: &'static str) -> Self {
        Self {
            rule_type,
            description,
            recommended: false,
            extends_base_rule: false,
            deprecated: false,
            has_suggestions: false,
        }
    }

    /// Marks the rule as recommended.
    #[must_use]
    pub const fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    /// Marks the rule as an extension of a base rule.
    #[must_use]
    pub const fn extends_base_rule(mut self) -> Self {
        self.extends_base_rule = true;
        self
    }

    /// Marks the rule as deprecated.
    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// A rule's fixed message templates keyed by message id.
///
/// Templates may contain `{{name}}` placeholders filled from report data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTable {
    entries: &'static [(&'static str, &'static str)],
}

impl MessageTable {
    /// Creates a table from `(id, template)` pairs.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Looks up the template for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, template)| *template)
    }

    /// Iterates over the message ids.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(id, _)| *id)
    }
}

/// A lint rule.
///
/// A rule is an immutable descriptor. [`Rule::create`] is called once per
/// traversal and returns the handlers for that traversal; any per-tree state
/// lives in those handlers.
///
/// # Example
///
/// ```
/// use lintkit_core::{
///     CreateContext, HandlerMap, MessageTable, Report, ResolvedOptions, Rule, RuleError,
///     RuleMeta, RuleType,
/// };
/// use lintkit_ast::{NodeKind, VisitControl};
///
/// struct NoEmptyStatement;
///
/// impl Rule for NoEmptyStatement {
///     fn name(&self) -> &'static str { "no-empty-statement" }
///
///     fn meta(&self) -> RuleMeta {
///         RuleMeta::new(RuleType::Suggestion, "Disallow empty statements")
///     }
///
///     fn messages(&self) -> MessageTable {
///         MessageTable::new(&[("unexpected", "Unexpected empty statement.")])
///     }
///
///     fn create(&self, _: &CreateContext<'_>, _: &ResolvedOptions) -> Result<HandlerMap, RuleError> {
///         Ok(HandlerMap::new().on_enter(NodeKind::EmptyStatement, |node, ctx| {
///             ctx.report(Report::new(node, "unexpected"))?;
///             Ok(VisitControl::Continue)
///         }))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "max-params").
    fn name(&self) -> &'static str;

    /// Returns the rule's metadata.
    fn meta(&self) -> RuleMeta;

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns the options schema. Defaults to accepting no options.
    fn schema(&self) -> RuleSchema {
        RuleSchema::none()
    }

    /// Returns the message table.
    fn messages(&self) -> MessageTable;

    /// Returns the default option values, one per slot.
    fn default_options(&self) -> Vec<Value> {
        Vec::new()
    }

    /// Builds the handlers for one traversal.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if the options cannot be read or the handlers
    /// cannot be composed.
    fn create(
        &self,
        ctx: &CreateContext<'_>,
        options: &ResolvedOptions,
    ) -> Result<HandlerMap, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::{NodeKind, VisitControl};

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }

        fn meta(&self) -> RuleMeta {
            RuleMeta::new(RuleType::Problem, "A test rule").recommended()
        }

        fn messages(&self) -> MessageTable {
            MessageTable::new(&[("found", "Found {{what}}."), ("other", "Other.")])
        }

        fn create(
            &self,
            _ctx: &CreateContext<'_>,
            _options: &ResolvedOptions,
        ) -> Result<HandlerMap, RuleError> {
            Ok(HandlerMap::new().on_enter(NodeKind::Identifier, |_, _| Ok(VisitControl::Continue)))
        }
    }

    #[test]
    fn rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(rule.schema(), RuleSchema::none());
        assert!(rule.default_options().is_empty());
        let meta = rule.meta();
        assert!(meta.recommended);
        assert!(!meta.extends_base_rule);
    }

    #[test]
    fn message_table_lookup() {
        let messages = TestRule.messages();
        assert_eq!(messages.get("found"), Some("Found {{what}}."));
        assert_eq!(messages.get("missing"), None);
        assert_eq!(messages.ids().collect::<Vec<_>>(), ["found", "other"]);
    }

    #[test]
    fn create_returns_handlers() {
        let ctx = CreateContext::new("test-rule", "a.ts");
        let handlers = TestRule
            .create(&ctx, &ResolvedOptions::default())
            .expect("create");
        assert!(handlers.contains(&Selector::enter(NodeKind::Identifier)));
    }
}
