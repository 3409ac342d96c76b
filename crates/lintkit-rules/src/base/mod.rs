//! Core JavaScript rules.
//!
//! These know nothing about TypeScript syntax. The crate's top-level rules
//! of the same names extend them by wrapping their handlers.

mod max_params;
mod no_unused_expressions;

pub use max_params::MaxParams;
pub use no_unused_expressions::NoUnusedExpressions;

pub(crate) use max_params::{function_params, function_params_mut, FUNCTION_KINDS};
pub(crate) use no_unused_expressions::UnusedExpressionOptions;
