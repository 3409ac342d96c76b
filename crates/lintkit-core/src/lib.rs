//! # lintkit-core
//!
//! Rule engine for linting ESTree / TypeScript-ESTree trees.
//!
//! This crate provides:
//!
//! - [`Rule`], the rule descriptor trait, with [`RuleMeta`] and
//!   [`MessageTable`]
//! - [`resolve_options_schema`] and [`resolve_options`] for option schemas and
//!   defaulting
//! - [`HandlerMap`] and [`Wrapper`] for building and decorating node handlers
//! - [`dispatch`], which drives many rules over one traversal
//! - [`Diagnostic`] and [`LintResult`] for findings
//! - [`Linter`] and [`Config`] for running configured rule sets
//!
//! ## Example
//!
//! ```
//! use lintkit_core::{
//!     CreateContext, HandlerMap, Linter, MessageTable, Report, ResolvedOptions, Rule,
//!     RuleError, RuleMeta, RuleType,
//! };
//! use lintkit_ast::{AstBuilder, NodeKind, SourceTree, VisitControl};
//!
//! struct NoEmptyStatement;
//!
//! impl Rule for NoEmptyStatement {
//!     fn name(&self) -> &'static str { "no-empty-statement" }
//!
//!     fn meta(&self) -> RuleMeta {
//!         RuleMeta::new(RuleType::Suggestion, "Disallow empty statements")
//!     }
//!
//!     fn messages(&self) -> MessageTable {
//!         MessageTable::new(&[("unexpected", "Unexpected empty statement.")])
//!     }
//!
//!     fn create(&self, _: &CreateContext<'_>, _: &ResolvedOptions) -> Result<HandlerMap, RuleError> {
//!         Ok(HandlerMap::new().on_enter(NodeKind::EmptyStatement, |node, ctx| {
//!             ctx.report(Report::new(node, "unexpected"))?;
//!             Ok(VisitControl::Continue)
//!         }))
//!     }
//! }
//!
//! let b = AstBuilder::new(";");
//! let tree = SourceTree::new(b.program(0..1, vec![b.empty_statement(0..1)]))?;
//! let linter = Linter::builder().rule(NoEmptyStatement).build()?;
//! let result = linter.lint(&tree, "a.js")?;
//! assert_eq!(result.diagnostics[0].to_string(), "a.js:1:1: error [no-empty-statement] Unexpected empty statement.");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod dispatch;
mod handler;
mod linter;
mod options;
mod rule;
mod schema;
mod types;

pub use config::{Config, ConfigError, RuleConfig};
pub use context::{interpolate, CreateContext, Report, RuleContext, SuggestionReport};
pub use dispatch::{dispatch, DispatchError, Phase, RuleRun, Selector};
pub use handler::{handler, Handler, HandlerMap, Wrapper};
pub use linter::{LintError, Linter, LinterBuilder};
pub use options::{apply_defaults, resolve_options, OptionsError, ResolvedOptions};
pub use rule::{MessageTable, Rule, RuleBox, RuleError, RuleMeta, RuleType};
pub use schema::{resolve_options_schema, ArraySchema, OptionsSchema, RuleSchema};
pub use types::{Diagnostic, DiagnosticReport, LintResult, Severity, Suggestion, TextEdit};
