//! Contexts handed to rules: one at creation, one per handler call.

use crate::options::ResolvedOptions;
use crate::rule::{MessageTable, RuleError};
use crate::types::{Diagnostic, Severity, Suggestion, TextEdit};
use lintkit_ast::{Node, NodeId, SourceLocation, SourceTree, Span};
use std::sync::Arc;

/// Ambient facts available when a rule builds its handlers.
#[derive(Debug, Clone, Copy)]
pub struct CreateContext<'a> {
    rule_name: &'a str,
    filename: &'a str,
}

impl<'a> CreateContext<'a> {
    /// Creates a creation context.
    #[must_use]
    pub fn new(rule_name: &'a str, filename: &'a str) -> Self {
        Self {
            rule_name,
            filename,
        }
    }

    /// Returns the name the rule is registered under.
    #[must_use]
    pub fn rule_name(&self) -> &'a str {
        self.rule_name
    }

    /// Returns the path of the file being linted.
    #[must_use]
    pub fn filename(&self) -> &'a str {
        self.filename
    }
}

/// A suggestion to attach to a [`Report`].
#[derive(Debug, Clone)]
pub struct SuggestionReport {
    message_id: &'static str,
    data: Vec<(&'static str, String)>,
    edits: Vec<TextEdit>,
}

impl SuggestionReport {
    /// Creates a suggestion described by `message_id`.
    #[must_use]
    pub fn new(message_id: &'static str) -> Self {
        Self {
            message_id,
            data: Vec::new(),
            edits: Vec::new(),
        }
    }

    /// Adds a placeholder value for the description.
    #[must_use]
    pub fn data(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.data.push((key, value.into()));
        self
    }

    /// Adds an edit.
    #[must_use]
    pub fn edit(mut self, edit: TextEdit) -> Self {
        self.edits.push(edit);
        self
    }
}

/// A finding about to be reported.
#[derive(Debug, Clone)]
pub struct Report<'n> {
    node: &'n Node,
    message_id: &'static str,
    data: Vec<(&'static str, String)>,
    location: Option<(Span, SourceLocation)>,
    suggestions: Vec<SuggestionReport>,
}

impl<'n> Report<'n> {
    /// Reports `message_id` at `node`'s span.
    #[must_use]
    pub fn new(node: &'n Node, message_id: &'static str) -> Self {
        Self {
            node,
            message_id,
            data: Vec::new(),
            location: None,
            suggestions: Vec::new(),
        }
    }

    /// Adds a `{{key}}` placeholder value.
    #[must_use]
    pub fn data(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.data.push((key, value.into()));
        self
    }

    /// Reports at another location instead of the node's.
    #[must_use]
    pub fn at(mut self, span: Span, loc: SourceLocation) -> Self {
        self.location = Some((span, loc));
        self
    }

    /// Reports at another node's location.
    #[must_use]
    pub fn at_node(self, node: &Node) -> Self {
        self.at(node.span(), node.loc())
    }

    /// Attaches a suggestion.
    #[must_use]
    pub fn suggest(mut self, suggestion: SuggestionReport) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// The view a handler has of the running traversal.
pub struct RuleContext<'a> {
    rule: &'a str,
    messages: MessageTable,
    severity: Severity,
    options: &'a ResolvedOptions,
    filename: &'a str,
    tree: &'a SourceTree,
    sink: &'a mut Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context. Normally done by [`dispatch`](crate::dispatch()).
    #[must_use]
    pub fn new(
        rule: &'a str,
        messages: MessageTable,
        severity: Severity,
        options: &'a ResolvedOptions,
        filename: &'a str,
        tree: &'a SourceTree,
        sink: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            rule,
            messages,
            severity,
            options,
            filename,
            tree,
            sink,
        }
    }

    /// Returns the running rule's name.
    #[must_use]
    pub fn rule_name(&self) -> &'a str {
        self.rule
    }

    /// Returns the running rule's resolved options.
    #[must_use]
    pub fn options(&self) -> &'a ResolvedOptions {
        self.options
    }

    /// Returns the path of the file being linted.
    #[must_use]
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Returns the tree being traversed.
    #[must_use]
    pub fn tree(&self) -> &'a SourceTree {
        self.tree
    }

    /// Returns the parent of `node`, which may be a shallow copy of a tree
    /// node.
    #[must_use]
    pub fn parent(&self, node: &Node) -> Option<&'a Arc<Node>> {
        self.tree.parent(node)
    }

    /// Looks up a tree node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&'a Arc<Node>> {
        self.tree.node(id)
    }

    /// Records a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnknownMessageId`] if the report's message id,
    /// or one of its suggestions' ids, is not in the rule's message table.
    pub fn report(&mut self, report: Report<'_>) -> Result<(), RuleError> {
        let message = self.render(report.message_id, &report.data)?;
        let suggestions = report
            .suggestions
            .into_iter()
            .map(|s| {
                Ok(Suggestion {
                    message_id: s.message_id.to_string(),
                    message: self.render(s.message_id, &s.data)?,
                    edits: s.edits,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        let (span, loc) = report
            .location
            .unwrap_or_else(|| (report.node.span(), report.node.loc()));
        self.sink.push(Diagnostic {
            rule: self.rule.to_string(),
            file: self.filename.to_string(),
            message_id: report.message_id.to_string(),
            message,
            severity: self.severity,
            span,
            loc,
            suggestions,
        });
        Ok(())
    }

    fn render(
        &self,
        message_id: &'static str,
        data: &[(&'static str, String)],
    ) -> Result<String, RuleError> {
        let template = self
            .messages
            .get(message_id)
            .ok_or_else(|| RuleError::UnknownMessageId {
                message_id: message_id.to_string(),
            })?;
        Ok(interpolate(template, data))
    }
}

/// Fills `{{ key }}` placeholders. Unknown keys are left as written.
#[must_use]
pub fn interpolate(template: &str, data: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}
