//! Visitor dispatch: one traversal of a tree driving the handlers of many
//! rules.

use crate::context::RuleContext;
use crate::handler::HandlerMap;
use crate::options::ResolvedOptions;
use crate::rule::{MessageTable, RuleError};
use crate::types::{Diagnostic, Severity};
use lintkit_ast::{walk, Node, NodeKind, SourceTree, VisitControl, Visitor};
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// When a handler runs relative to the node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Before the children.
    Enter,
    /// After the children.
    Exit,
}

/// A node kind plus a phase: the key of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    /// Node kind the handler is registered for.
    pub kind: NodeKind,
    /// Enter or exit.
    pub phase: Phase,
}

impl Selector {
    /// Creates a selector.
    #[must_use]
    pub const fn new(kind: NodeKind, phase: Phase) -> Self {
        Self { kind, phase }
    }

    /// Enter selector for `kind`.
    #[must_use]
    pub const fn enter(kind: NodeKind) -> Self {
        Self::new(kind, Phase::Enter)
    }

    /// Exit selector for `kind`.
    #[must_use]
    pub const fn exit(kind: NodeKind) -> Self {
        Self::new(kind, Phase::Exit)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Enter => write!(f, "{}", self.kind),
            Phase::Exit => write!(f, "{}:exit", self.kind),
        }
    }
}

/// One rule's participation in a traversal.
pub struct RuleRun<'a> {
    /// Rule name, used to tag diagnostics and errors.
    pub rule: &'a str,
    /// Message table reports are resolved against.
    pub messages: MessageTable,
    /// Severity given to this rule's diagnostics.
    pub severity: Severity,
    /// Resolved options, visible to handlers through the context.
    pub options: &'a ResolvedOptions,
    /// Handlers created for this traversal.
    pub handlers: HandlerMap,
}

impl fmt::Debug for RuleRun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRun")
            .field("rule", &self.rule)
            .field("severity", &self.severity)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// A handler failed; the traversal was abandoned.
#[derive(Debug, Error)]
#[error("rule `{rule}` failed on {selector}: {source}")]
pub struct DispatchError {
    /// Name of the failing rule.
    pub rule: String,
    /// Selector whose handler failed.
    pub selector: Selector,
    /// The handler's error.
    #[source]
    pub source: RuleError,
}

/// Traverses `tree` once, calling the handlers of every run.
///
/// For each node: enter handlers of each run in run order, then the
/// children, then exit handlers in run order. Kinds without a handler are
/// skipped. A run whose enter handler returns [`VisitControl::SkipChildren`]
/// gets no callbacks for that node's descendants but still gets the node's
/// exit; other runs are unaffected. Diagnostics are appended to `sink` in
/// emission order.
///
/// # Errors
///
/// The first handler error aborts the traversal and is returned tagged with
/// the rule name.
pub fn dispatch(
    tree: &SourceTree,
    filename: &str,
    runs: &mut [RuleRun<'_>],
    sink: &mut Vec<Diagnostic>,
) -> Result<(), DispatchError> {
    let mut dispatcher = Dispatcher {
        tree,
        filename,
        skipped: vec![None; runs.len()],
        runs,
        sink,
        depth: 0,
    };
    walk(tree.root(), &mut dispatcher)
}

struct Dispatcher<'d, 'a> {
    tree: &'d SourceTree,
    filename: &'d str,
    runs: &'d mut [RuleRun<'a>],
    // Depth of the node whose enter handler asked to skip, per run.
    skipped: Vec<Option<usize>>,
    sink: &'d mut Vec<Diagnostic>,
    depth: usize,
}

impl Dispatcher<'_, '_> {
    fn call(
        &mut self,
        index: usize,
        selector: Selector,
        node: &Node,
    ) -> Result<Option<VisitControl>, DispatchError> {
        let run = &mut self.runs[index];
        if !run.handlers.contains(&selector) {
            return Ok(None);
        }
        trace!(rule = run.rule, %selector, "dispatch");
        let mut ctx = RuleContext::new(
            run.rule,
            run.messages,
            run.severity,
            run.options,
            self.filename,
            self.tree,
            self.sink,
        );
        run.handlers
            .call(selector, node, &mut ctx)
            .map_err(|source| DispatchError {
                rule: run.rule.to_string(),
                selector,
                source,
            })
    }
}

impl Visitor for Dispatcher<'_, '_> {
    type Error = DispatchError;

    fn enter(&mut self, node: &Node) -> Result<VisitControl, DispatchError> {
        let depth = self.depth;
        self.depth += 1;
        let selector = Selector::enter(node.kind());
        for index in 0..self.runs.len() {
            if self.skipped[index].is_some() {
                continue;
            }
            if self.call(index, selector, node)? == Some(VisitControl::SkipChildren) {
                self.skipped[index] = Some(depth);
            }
        }
        if self.skipped.iter().all(Option::is_some) {
            Ok(VisitControl::SkipChildren)
        } else {
            Ok(VisitControl::Continue)
        }
    }

    fn leave(&mut self, node: &Node) -> Result<(), DispatchError> {
        self.depth -= 1;
        let depth = self.depth;
        let selector = Selector::exit(node.kind());
        for index in 0..self.runs.len() {
            match self.skipped[index] {
                Some(skipped_at) if skipped_at < depth => continue,
                Some(_) => self.skipped[index] = None,
                None => {}
            }
            self.call(index, selector, node)?;
        }
        Ok(())
    }
}
