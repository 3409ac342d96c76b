//! Attached trees: node identities, parent back-references and validation.

use crate::error::SchemaError;
use crate::schema::{Node, NodeId};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// A validated syntax tree for one source text.
///
/// Construction assigns every node a pre-order [`NodeId`] and records the
/// parent of each node by id. Children stay owned by their parents; the
/// parent table is a back-reference only.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: Arc<Node>,
    nodes: Vec<Arc<Node>>,
    parents: Vec<Option<NodeId>>,
}

impl SourceTree {
    /// Attaches and validates a tree.
    ///
    /// A subtree that appears at more than one position is copied so that
    /// every position gets its own identity.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if a child slot holds a node of a kind the slot
    /// does not accept, or if a node's range is inverted.
    pub fn new(mut root: Arc<Node>) -> Result<Self, SchemaError> {
        let mut attach = Attach::default();
        attach.visit(&mut root, None)?;
        let nodes: Vec<Arc<Node>> = attach.nodes.into_iter().flatten().collect();
        debug!(nodes = nodes.len(), root = %root.kind(), "attached tree");
        Ok(Self {
            root,
            nodes,
            parents: attach.parents,
        })
    }

    /// Deserializes an ESTree JSON document and attaches it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] for malformed input and any validation
    /// error from [`SourceTree::new`].
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let root = Node::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Self::new(Arc::new(root))
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes. Never true for a constructed
    /// tree; present for API symmetry with [`SourceTree::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Arc<Node>> {
        self.nodes.get(id.index())
    }

    /// Returns the parent of `node`.
    ///
    /// Works for the attached node itself and for any shallow copy derived
    /// from it. Returns `None` for the root and for detached nodes.
    #[must_use]
    pub fn parent(&self, node: &Node) -> Option<&Arc<Node>> {
        let id = node.id();
        if id.is_detached() {
            return None;
        }
        let parent = (*self.parents.get(id.index())?)?;
        self.node(parent)
    }

    /// Iterates over the ancestors of `node`, nearest first.
    pub fn ancestors<'t>(&'t self, node: &Node) -> impl Iterator<Item = &'t Arc<Node>> + 't {
        std::iter::successors(self.parent(node), move |current| self.parent(current))
    }

    /// Iterates over all nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.iter()
    }
}

/// Stack left before recursion switches to a fresh segment.
pub(crate) const RED_ZONE: usize = 64 * 1024;
/// Size of each extra stack segment.
pub(crate) const STACK_SEGMENT: usize = 1024 * 1024;

#[derive(Default)]
struct Attach {
    nodes: Vec<Option<Arc<Node>>>,
    parents: Vec<Option<NodeId>>,
}

impl Attach {
    fn visit(&mut self, slot: &mut Arc<Node>, parent: Option<NodeId>) -> Result<(), SchemaError> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.attach(slot, parent))
    }

    fn attach(&mut self, slot: &mut Arc<Node>, parent: Option<NodeId>) -> Result<(), SchemaError> {
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&index| index != u32::MAX)
            .ok_or(SchemaError::TooManyNodes { max: u32::MAX - 1 })?;
        let id = NodeId::new(index);
        self.nodes.push(None);
        self.parents.push(parent);

        let node = Arc::make_mut(slot);
        node.base_mut().id = id;
        validate(node)?;
        trace!(id = index, kind = %node.kind(), "attach");

        for child in node.children_mut() {
            self.visit(child, Some(id))?;
        }
        self.nodes[id.index()] = Some(Arc::clone(slot));
        Ok(())
    }
}

fn validate(node: &Node) -> Result<(), SchemaError> {
    let span = node.span();
    if span.start > span.end {
        return Err(SchemaError::InvalidSpan {
            kind: node.kind(),
            span,
        });
    }
    for slot in node.slots() {
        let found = slot.node.kind();
        if !slot.expected.accepts(found) {
            return Err(SchemaError::UnexpectedKind {
                parent: node.kind(),
                field: slot.field,
                index: slot.index,
                expected: slot.expected,
                found,
            });
        }
    }
    Ok(())
}
