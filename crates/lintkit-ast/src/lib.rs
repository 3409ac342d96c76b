//! # lintkit-ast
//!
//! ESTree / TypeScript-ESTree syntax tree model for lintkit.
//!
//! This crate provides:
//!
//! - [`Node`], a closed tagged union over every supported syntax kind, and
//!   [`NodeKind`], its discriminant
//! - [`Union`], the named kind groups that child slots accept
//! - [`SourceTree`], a validated tree with node identities and parent
//!   back-references
//! - [`walk`] and [`Visitor`] for generic depth-first traversal
//! - [`AstBuilder`] for assembling trees without a parser
//!
//! ## Example
//!
//! ```
//! use lintkit_ast::{AstBuilder, NodeKind, SourceTree};
//!
//! let b = AstBuilder::new("a?.b;");
//! let member = b.member(0..4, b.identifier(0..1, "a"), b.identifier(3..4, "b"), true);
//! let stmt = b.expression_statement(0..5, b.chain(0..4, member));
//! let tree = SourceTree::new(b.program(0..5, vec![stmt]))?;
//!
//! let kinds: Vec<NodeKind> = tree.iter().map(|n| n.kind()).collect();
//! assert_eq!(kinds[2], NodeKind::ChainExpression);
//! # Ok::<(), lintkit_ast::SchemaError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod error;
mod nodes;
mod schema;
mod span;
mod tree;
mod union;
mod visit;

pub use builder::AstBuilder;
pub use error::{SchemaError, UnknownNodeKind};
pub use nodes::*;
pub use schema::{
    AstNode, BaseNode, Cardinality, Expected, FieldSpec, Node, NodeId, NodeKind, Slot,
};
pub use span::{LineIndex, Position, SourceLocation, Span};
pub use tree::SourceTree;
pub use union::Union;
pub use visit::{walk, VisitControl, Visitor};
