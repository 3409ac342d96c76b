//! # lintkit-rules
//!
//! Built-in lint rules for lintkit.
//!
//! The [`base`] module holds the core JavaScript rules. The top-level rules
//! extend them for TypeScript syntax by wrapping their handlers, so they
//! share the base rules' names and messages.
//!
//! ## Available Rules
//!
//! | Name | Recommended | Description |
//! |------|-------------|-------------|
//! | `max-params` | | Enforce a maximum number of parameters in function definitions |
//! | `no-unused-expressions` | yes | Disallow unused expressions |
//!
//! ## Usage
//!
//! ```
//! use lintkit_core::Linter;
//! use lintkit_rules::{MaxParams, Preset};
//! use serde_json::json;
//!
//! let linter = Linter::builder()
//!     .rules(Preset::Recommended.rules())
//!     .rule(MaxParams::new())
//!     .options("max-params", vec![json!({"max": 4})])
//!     .build()?;
//! assert_eq!(linter.rule_count(), 2);
//! # Ok::<(), lintkit_core::LintError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod base;
mod max_params;
mod no_unused_expressions;
mod presets;

pub use max_params::MaxParams;
pub use no_unused_expressions::NoUnusedExpressions;
pub use presets::{all_rules, recommended_rules, rule_by_name, strict_rules, Preset, UnknownPreset};

/// Re-export core types for convenience.
pub use lintkit_core::{Diagnostic, Rule, Severity};
