//! Generic depth-first traversal.

use crate::schema::Node;
use crate::tree::{RED_ZONE, STACK_SEGMENT};

/// Returned from [`Visitor::enter`] to steer the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitControl {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not visit the node's children. The node's `leave` still runs.
    SkipChildren,
}

/// Callbacks invoked by [`walk`].
pub trait Visitor {
    /// Error that aborts the walk.
    type Error;

    /// Called before the node's children are visited.
    ///
    /// # Errors
    ///
    /// Any error stops the walk and is returned from [`walk`].
    fn enter(&mut self, node: &Node) -> Result<VisitControl, Self::Error> {
        let _ = node;
        Ok(VisitControl::Continue)
    }

    /// Called after the node's children are visited (or skipped).
    ///
    /// # Errors
    ///
    /// Any error stops the walk and is returned from [`walk`].
    fn leave(&mut self, node: &Node) -> Result<(), Self::Error> {
        let _ = node;
        Ok(())
    }
}

/// Walks `node` and its descendants in source order: `enter` pre-order,
/// `leave` post-order, children in declared field order.
///
/// # Errors
///
/// Returns the first error produced by the visitor.
pub fn walk<V: Visitor + ?Sized>(node: &Node, visitor: &mut V) -> Result<(), V::Error> {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
        if visitor.enter(node)? == VisitControl::Continue {
            for child in node.children() {
                walk(child, visitor)?;
            }
        }
        visitor.leave(node)
    })
}
