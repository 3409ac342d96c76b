//! # lintkit
//!
//! AST-based lint engine for ESTree and TypeScript-ESTree trees.
//!
//! This is the facade crate that re-exports the node schema, the rule
//! engine and the built-in rules, and lints a serialized tree in one call.
//!
//! ## Quick Start
//!
//! ```toml
//! # lintkit.toml
//! preset = "recommended"
//! fail_on = "warning"
//!
//! [rules.max-params]
//! options = [{ max = 4 }]
//! ```
//!
//! ```rust,ignore
//! let config = lintkit::load_config(std::path::Path::new("."))?;
//! let result = lintkit::lint_json(&std::fs::read_to_string("a.ts.json")?, "a.ts", &config)?;
//! for diagnostic in &result.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```
//!
//! ## Programmatic Usage
//!
//! ```
//! use lintkit::rules::{MaxParams, NoUnusedExpressions};
//! use lintkit::Linter;
//!
//! let linter = Linter::builder()
//!     .rule(MaxParams::new())
//!     .rule(NoUnusedExpressions::new())
//!     .build()?;
//! let names: Vec<_> = linter.rule_names().collect();
//! assert_eq!(names, ["max-params", "no-unused-expressions"]);
//! # Ok::<(), lintkit::LintError>(())
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use lintkit_core::*;

/// Node schema and tree types.
pub mod ast {
    pub use lintkit_ast::*;
}

/// Built-in rules and presets.
pub mod rules {
    pub use lintkit_rules::*;
}

mod runner;

pub use runner::{
    check_json, find_config, lint_json, linter_from_config, load_config, resolve_preset,
    RunError, CONFIG_CANDIDATES,
};
