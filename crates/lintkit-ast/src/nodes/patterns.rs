//! Binding pattern and parameter nodes.

use super::operators::Accessibility;
use crate::schema::BaseNode;
use crate::Node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `left = right` in a binding position (default value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPattern {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Bound target.
    pub left: Arc<Node>,
    /// Default value.
    pub right: Arc<Node>,
}

/// `...argument` in a binding position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestElement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Bound target.
    pub argument: Arc<Node>,
    /// Type annotation.
    pub type_annotation: Option<Arc<Node>>,
}

/// `[a, , b]` in a binding position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayPattern {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Elements; `None` marks a hole.
    #[serde(default)]
    pub elements: Vec<Option<Arc<Node>>>,
    /// Type annotation.
    pub type_annotation: Option<Arc<Node>>,
}

/// `{ a, b: c, ...rest }` in a binding position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPattern {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Properties and rest element.
    #[serde(default)]
    pub properties: Vec<Arc<Node>>,
    /// Type annotation.
    pub type_annotation: Option<Arc<Node>>,
}

/// Constructor parameter with a modifier, e.g. `private readonly x: number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSParameterProperty {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// The underlying parameter.
    pub parameter: Arc<Node>,
    /// Accessibility modifier.
    pub accessibility: Option<Accessibility>,
    /// `readonly`
    #[serde(default)]
    pub readonly: bool,
    /// `override`
    #[serde(default, rename = "override")]
    pub is_override: bool,
}
