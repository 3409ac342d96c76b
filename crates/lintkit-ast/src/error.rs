//! Error types for tree construction.

use crate::schema::{Expected, NodeKind};
use crate::span::Span;
use thiserror::Error;

/// A `type` tag that names no known node kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownNodeKind(pub String);

/// A tree that violates the node schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A child slot holds a node of a kind the slot does not accept.
    #[error("{parent}.{field}{} expects {expected}, found {found}", index_suffix(.index))]
    UnexpectedKind {
        /// Kind of the node owning the slot.
        parent: NodeKind,
        /// Slot name.
        field: &'static str,
        /// Position within a sequence slot.
        index: Option<usize>,
        /// What the slot accepts.
        expected: Expected,
        /// What was found.
        found: NodeKind,
    },

    /// A node range whose start lies after its end.
    #[error("{kind} has an inverted range {span}")]
    InvalidSpan {
        /// Offending node kind.
        kind: NodeKind,
        /// Offending range.
        span: Span,
    },

    /// The tree has more nodes than ids can address.
    #[error("tree has more than {max} nodes")]
    TooManyNodes {
        /// Maximum node count.
        max: u32,
    },

    /// The JSON input is not a well-formed tree.
    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn index_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!("[{i}]")).unwrap_or_default()
}
