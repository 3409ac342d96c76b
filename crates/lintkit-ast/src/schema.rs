//! The node schema: one table listing every node kind with its child fields.
//!
//! The [`node_schema!`] table is the single source of truth for which child
//! slots a kind has, in which order they are visited, how many nodes each slot
//! holds and which kinds a slot accepts. From it the macro generates [`Node`],
//! [`NodeKind`], [`AstNode`] impls, [`Node::slots`] and [`NodeKind::fields`].

use crate::error::UnknownNodeKind;
use crate::nodes::*;
use crate::span::{SourceLocation, Span};
use crate::union::Union;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a node inside a [`SourceTree`](crate::SourceTree).
///
/// Assigned in pre-order when the tree is attached. Shallow copies of a node
/// keep its id, so they can still be related back to the original tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Id carried by nodes that were never attached to a tree.
    pub const DETACHED: NodeId = NodeId(u32::MAX);

    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the pre-order index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if the node has not been attached to a tree.
    #[must_use]
    pub const fn is_detached(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::DETACHED
    }
}

/// Attributes shared by every node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseNode {
    /// Tree identity; not part of the serialized form.
    #[serde(skip)]
    pub id: NodeId,
    /// Byte range in the source text.
    pub range: Span,
    /// Line/column location.
    pub loc: SourceLocation,
}

impl BaseNode {
    /// Creates a detached base with the given range and location.
    #[must_use]
    pub fn new(range: Span, loc: SourceLocation) -> Self {
        Self {
            id: NodeId::DETACHED,
            range,
            loc,
        }
    }
}

/// Implemented by every per-kind node struct.
pub trait AstNode: Sized {
    /// The kind this struct represents.
    const KIND: NodeKind;

    /// Narrows a [`Node`] to this kind.
    fn from_node(node: &Node) -> Option<&Self>;

    /// Wraps this struct into a [`Node`].
    fn into_node(self) -> Node;
}

/// How many nodes a child field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one child.
    Required,
    /// Zero or one child (`null` in ESTree).
    Optional,
    /// Ordered list of children.
    Sequence,
    /// Ordered list whose entries may be holes.
    SparseSequence,
}

/// What a child field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// Exactly this kind.
    Kind(NodeKind),
    /// Any member of this union.
    Union(Union),
}

impl Expected {
    /// Returns true if a node of `kind` may occupy the slot.
    #[must_use]
    pub fn accepts(self, kind: NodeKind) -> bool {
        match self {
            Self::Kind(expected) => expected == kind,
            Self::Union(union) => union.contains(kind),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Union(union) => write!(f, "{union}"),
        }
    }
}

/// Static description of one child field of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as written in the Rust struct.
    pub name: &'static str,
    /// Number of nodes the field holds.
    pub cardinality: Cardinality,
    /// Kinds the field accepts.
    pub expected: Expected,
}

/// One occupied child position of a concrete node.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    /// Field name.
    pub field: &'static str,
    /// Position within a sequence field.
    pub index: Option<usize>,
    /// Kinds the field accepts.
    pub expected: Expected,
    /// The child node.
    pub node: &'a Node,
}

macro_rules! cardinality {
    (one) => {
        Cardinality::Required
    };
    (opt) => {
        Cardinality::Optional
    };
    (seq) => {
        Cardinality::Sequence
    };
    (holes) => {
        Cardinality::SparseSequence
    };
}

macro_rules! expected {
    (kind $target:ident) => {
        Expected::Kind(NodeKind::$target)
    };
    (union $target:ident) => {
        Expected::Union(Union::$target)
    };
}

macro_rules! push_slots {
    (one, $value:expr, $field:expr, $expected:expr, $out:ident) => {
        $out.push(Slot {
            field: $field,
            index: None,
            expected: $expected,
            node: &*$value,
        })
    };
    (opt, $value:expr, $field:expr, $expected:expr, $out:ident) => {
        if let Some(child) = &$value {
            $out.push(Slot {
                field: $field,
                index: None,
                expected: $expected,
                node: &**child,
            });
        }
    };
    (seq, $value:expr, $field:expr, $expected:expr, $out:ident) => {
        for (i, child) in $value.iter().enumerate() {
            $out.push(Slot {
                field: $field,
                index: Some(i),
                expected: $expected,
                node: &**child,
            });
        }
    };
    (holes, $value:expr, $field:expr, $expected:expr, $out:ident) => {
        for (i, child) in $value.iter().enumerate() {
            if let Some(child) = child {
                $out.push(Slot {
                    field: $field,
                    index: Some(i),
                    expected: $expected,
                    node: &**child,
                });
            }
        }
    };
}

macro_rules! push_children_mut {
    (one, $value:expr, $out:ident) => {
        $out.push(&mut $value)
    };
    (opt, $value:expr, $out:ident) => {
        if let Some(child) = &mut $value {
            $out.push(child);
        }
    };
    (seq, $value:expr, $out:ident) => {
        $out.extend($value.iter_mut())
    };
    (holes, $value:expr, $out:ident) => {
        $out.extend($value.iter_mut().flatten())
    };
}

macro_rules! node_schema {
    (
        $(
            $kind:ident { $( $field:ident : $card:ident ( $mode:ident $target:ident ) ),* $(,)? }
        ),* $(,)?
    ) => {
        /// A syntax node. The variant is the node's tag; it determines the
        /// field set of the wrapped struct.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Node {
            $(
                #[allow(missing_docs)]
                $kind($kind),
            )*
        }

        /// The tag of a [`Node`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum NodeKind {
            $(
                #[allow(missing_docs)]
                $kind,
            )*
        }

        impl NodeKind {
            /// Every kind, in schema order.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$kind, )* ];

            /// Returns the ESTree `type` string of this kind.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( NodeKind::$kind => stringify!($kind), )*
                }
            }

            /// Returns the child fields of this kind in visiting order.
            #[must_use]
            pub fn fields(self) -> &'static [FieldSpec] {
                match self {
                    $(
                        NodeKind::$kind => &[
                            $(
                                FieldSpec {
                                    name: stringify!($field),
                                    cardinality: cardinality!($card),
                                    expected: expected!($mode $target),
                                },
                            )*
                        ],
                    )*
                }
            }
        }

        impl std::str::FromStr for NodeKind {
            type Err = UnknownNodeKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($kind) => Ok(NodeKind::$kind), )*
                    _ => Err(UnknownNodeKind(s.to_string())),
                }
            }
        }

        impl Node {
            /// Returns the tag of this node.
            #[must_use]
            pub const fn kind(&self) -> NodeKind {
                match self {
                    $( Node::$kind(_) => NodeKind::$kind, )*
                }
            }

            /// Returns the attributes shared by every node.
            #[must_use]
            pub fn base(&self) -> &BaseNode {
                match self {
                    $( Node::$kind(n) => &n.base, )*
                }
            }

            pub(crate) fn base_mut(&mut self) -> &mut BaseNode {
                match self {
                    $( Node::$kind(n) => &mut n.base, )*
                }
            }

            /// Returns the occupied child positions in visiting order: fields
            /// in declared order, sequence entries in index order, holes and
            /// `None` slots skipped.
            #[must_use]
            #[allow(unused_variables)]
            pub fn slots(&self) -> Vec<Slot<'_>> {
                let mut out = Vec::new();
                match self {
                    $(
                        Node::$kind(n) => {
                            $( push_slots!($card, n.$field, stringify!($field), expected!($mode $target), out); )*
                        }
                    )*
                }
                out
            }

            #[allow(unused_variables)]
            pub(crate) fn children_mut(&mut self) -> Vec<&mut Arc<Node>> {
                let mut out = Vec::new();
                match self {
                    $(
                        Node::$kind(n) => {
                            $( push_children_mut!($card, n.$field, out); )*
                        }
                    )*
                }
                out
            }
        }

        $(
            impl AstNode for $kind {
                const KIND: NodeKind = NodeKind::$kind;

                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$kind(n) => Some(n),
                        _ => None,
                    }
                }

                fn into_node(self) -> Node {
                    Node::$kind(self)
                }
            }

            impl From<$kind> for Node {
                fn from(node: $kind) -> Self {
                    Node::$kind(node)
                }
            }
        )*
    };
}

node_schema! {
    Program { body: seq(union Statement) },

    // Statements and declarations
    ExpressionStatement { expression: one(union Expression) },
    BlockStatement { body: seq(union Statement) },
    EmptyStatement {},
    IfStatement {
        test: one(union Expression),
        consequent: one(union Statement),
        alternate: opt(union Statement),
    },
    ReturnStatement { argument: opt(union Expression) },
    VariableDeclaration { declarations: seq(kind VariableDeclarator) },
    VariableDeclarator {
        id: one(union BindingName),
        init: opt(union Expression),
    },
    FunctionDeclaration {
        id: opt(kind Identifier),
        type_parameters: opt(kind TSTypeParameterDeclaration),
        params: seq(union Parameter),
        return_type: opt(kind TSTypeAnnotation),
        body: one(kind BlockStatement),
    },
    ClassDeclaration {
        id: opt(kind Identifier),
        type_parameters: opt(kind TSTypeParameterDeclaration),
        super_class: opt(union Expression),
        super_type_arguments: opt(kind TSTypeParameterInstantiation),
        body: one(kind ClassBody),
    },
    ClassBody { body: seq(union ClassElement) },
    MethodDefinition {
        key: one(union Expression),
        value: one(kind FunctionExpression),
    },
    PropertyDefinition {
        key: one(union Expression),
        type_annotation: opt(kind TSTypeAnnotation),
        value: opt(union Expression),
    },
    ExportNamedDeclaration {
        declaration: opt(union Statement),
        source: opt(kind Literal),
    },
    TSModuleDeclaration {
        id: one(union ModuleName),
        body: opt(kind TSModuleBlock),
    },
    TSModuleBlock { body: seq(union Statement) },

    // Expressions
    Identifier { type_annotation: opt(kind TSTypeAnnotation) },
    Literal {},
    ThisExpression {},
    Super {},
    ArrayExpression { elements: holes(union ExpressionOrSpread) },
    ObjectExpression { properties: seq(union ObjectLiteralElement) },
    Property {
        key: one(union Expression),
        value: one(union PropertyValue),
    },
    SpreadElement { argument: one(union Expression) },
    FunctionExpression {
        id: opt(kind Identifier),
        type_parameters: opt(kind TSTypeParameterDeclaration),
        params: seq(union Parameter),
        return_type: opt(kind TSTypeAnnotation),
        body: one(kind BlockStatement),
    },
    ArrowFunctionExpression {
        type_parameters: opt(kind TSTypeParameterDeclaration),
        params: seq(union Parameter),
        return_type: opt(kind TSTypeAnnotation),
        body: one(union ArrowBody),
    },
    ClassExpression {
        id: opt(kind Identifier),
        type_parameters: opt(kind TSTypeParameterDeclaration),
        super_class: opt(union Expression),
        super_type_arguments: opt(kind TSTypeParameterInstantiation),
        body: one(kind ClassBody),
    },
    TemplateLiteral {
        quasis: seq(kind TemplateElement),
        expressions: seq(union Expression),
    },
    TemplateElement {},
    TaggedTemplateExpression {
        tag: one(union Expression),
        type_arguments: opt(kind TSTypeParameterInstantiation),
        quasi: one(kind TemplateLiteral),
    },
    UnaryExpression { argument: one(union Expression) },
    UpdateExpression { argument: one(union Expression) },
    BinaryExpression {
        left: one(union Expression),
        right: one(union Expression),
    },
    LogicalExpression {
        left: one(union Expression),
        right: one(union Expression),
    },
    AssignmentExpression {
        left: one(union AssignmentTarget),
        right: one(union Expression),
    },
    ConditionalExpression {
        test: one(union Expression),
        consequent: one(union Expression),
        alternate: one(union Expression),
    },
    CallExpression {
        callee: one(union Expression),
        type_arguments: opt(kind TSTypeParameterInstantiation),
        arguments: seq(union ExpressionOrSpread),
    },
    NewExpression {
        callee: one(union Expression),
        type_arguments: opt(kind TSTypeParameterInstantiation),
        arguments: seq(union ExpressionOrSpread),
    },
    MemberExpression {
        object: one(union Expression),
        property: one(union Expression),
    },
    ChainExpression { expression: one(union ChainElement) },
    SequenceExpression { expressions: seq(union Expression) },
    ImportExpression {
        source: one(union Expression),
        options: opt(union Expression),
    },
    AwaitExpression { argument: one(union Expression) },
    YieldExpression { argument: opt(union Expression) },
    MetaProperty {
        meta: one(kind Identifier),
        property: one(kind Identifier),
    },
    TSAsExpression {
        expression: one(union Expression),
        type_annotation: one(union TypeNode),
    },
    TSTypeAssertion {
        type_annotation: one(union TypeNode),
        expression: one(union Expression),
    },
    TSNonNullExpression { expression: one(union Expression) },
    TSInstantiationExpression {
        expression: one(union Expression),
        type_arguments: one(kind TSTypeParameterInstantiation),
    },

    // Patterns
    AssignmentPattern {
        left: one(union BindingName),
        right: one(union Expression),
    },
    RestElement {
        argument: one(union BindingName),
        type_annotation: opt(kind TSTypeAnnotation),
    },
    ArrayPattern {
        elements: holes(union PatternElement),
        type_annotation: opt(kind TSTypeAnnotation),
    },
    ObjectPattern {
        properties: seq(union ObjectPatternElement),
        type_annotation: opt(kind TSTypeAnnotation),
    },
    TSParameterProperty { parameter: one(union BindingElement) },

    // Types
    TSTypeAnnotation { type_annotation: one(union TypeNode) },
    TSTypeReference {
        type_name: one(union EntityName),
        type_arguments: opt(kind TSTypeParameterInstantiation),
    },
    TSQualifiedName {
        left: one(union EntityName),
        right: one(kind Identifier),
    },
    TSTypeParameterInstantiation { params: seq(union TypeNode) },
    TSTypeParameterDeclaration { params: seq(kind TSTypeParameter) },
    TSTypeParameter {
        name: one(kind Identifier),
        constraint: opt(union TypeNode),
        default: opt(union TypeNode),
    },
    TSImportType {
        argument: one(union TypeNode),
        qualifier: opt(union EntityName),
        type_arguments: opt(kind TSTypeParameterInstantiation),
    },
    TSUnionType { types: seq(union TypeNode) },
    TSArrayType { element_type: one(union TypeNode) },
    TSLiteralType { literal: one(union LiteralTypeValue) },
    TSFunctionType {
        type_parameters: opt(kind TSTypeParameterDeclaration),
        params: seq(union Parameter),
        return_type: opt(kind TSTypeAnnotation),
    },
    TSThisType {},
    TSAnyKeyword {},
    TSUnknownKeyword {},
    TSNumberKeyword {},
    TSStringKeyword {},
    TSBooleanKeyword {},
    TSVoidKeyword {},
    TSUndefinedKeyword {},
    TSNullKeyword {},
    TSNeverKeyword {},
    TSObjectKeyword {},
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Returns the tree identity of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.base().id
    }

    /// Returns the byte range of this node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.base().range
    }

    /// Returns the line/column location of this node.
    #[must_use]
    pub fn loc(&self) -> SourceLocation {
        self.base().loc
    }

    /// Returns the child nodes in visiting order.
    #[must_use]
    pub fn children(&self) -> Vec<&Node> {
        self.slots().into_iter().map(|slot| slot.node).collect()
    }

    /// Returns true if this node's tag belongs to `union`.
    #[must_use]
    pub fn is(&self, union: Union) -> bool {
        union.contains(self.kind())
    }

    /// Narrows this node to a concrete kind.
    #[must_use]
    pub fn downcast<T: AstNode>(&self) -> Option<&T> {
        T::from_node(self)
    }
}
