//! Per-kind node structs.
//!
//! Every struct carries a flattened [`BaseNode`](crate::BaseNode) and its
//! kind-specific fields. Child slots hold `Arc<Node>` so that cloning a node
//! produces a shallow copy sharing its children.

mod expressions;
mod operators;
mod patterns;
mod statements;
mod types;

pub use expressions::*;
pub use operators::*;
pub use patterns::*;
pub use statements::*;
pub use types::*;
