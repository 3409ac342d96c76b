//! TypeScript type nodes.

use crate::schema::BaseNode;
use crate::Node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `: Type` attached to a binding, parameter or return position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSTypeAnnotation {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// The annotated type.
    pub type_annotation: Arc<Node>,
}

/// A reference to a named type, e.g. `Map<K, V>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSTypeReference {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Referenced name.
    pub type_name: Arc<Node>,
    /// Type arguments.
    pub type_arguments: Option<Arc<Node>>,
}

/// `Left.Right` in a type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSQualifiedName {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Qualifier.
    pub left: Arc<Node>,
    /// Last segment.
    pub right: Arc<Node>,
}

/// `<A, B>` supplied to a generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSTypeParameterInstantiation {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Type arguments.
    #[serde(default)]
    pub params: Vec<Arc<Node>>,
}

/// `<T, U extends X>` declared on a generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSTypeParameterDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Declared parameters.
    #[serde(default)]
    pub params: Vec<Arc<Node>>,
}

/// One declared type parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSTypeParameter {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Parameter name.
    pub name: Arc<Node>,
    /// `extends` constraint.
    pub constraint: Option<Arc<Node>>,
    /// Default type.
    pub default: Option<Arc<Node>>,
    /// `in T`
    #[serde(default, rename = "in")]
    pub is_in: bool,
    /// `out T`
    #[serde(default)]
    pub out: bool,
    /// `const T`
    #[serde(default, rename = "const")]
    pub is_const: bool,
}

/// `import('module').Qualifier<Args>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSImportType {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Module specifier type.
    pub argument: Arc<Node>,
    /// Member reached through the imported module.
    pub qualifier: Option<Arc<Node>>,
    /// Type arguments.
    pub type_arguments: Option<Arc<Node>>,
}

/// `A | B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSUnionType {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Constituents.
    #[serde(default)]
    pub types: Vec<Arc<Node>>,
}

/// `T[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSArrayType {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Element type.
    pub element_type: Arc<Node>,
}

/// A literal used as a type, e.g. `'a'`, `-1`, `` `x${string}` ``.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSLiteralType {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// The literal.
    pub literal: Arc<Node>,
}

/// `(params) => ReturnType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSFunctionType {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// Parameters.
    #[serde(default)]
    pub params: Vec<Arc<Node>>,
    /// Return type.
    pub return_type: Option<Arc<Node>>,
}

macro_rules! keyword_types {
    ($( $(#[$doc:meta])* $name:ident ),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            pub struct $name {
                /// Shared node attributes.
                #[serde(flatten)]
                pub base: BaseNode,
            }
        )*
    };
}

keyword_types! {
    /// `this` in a type position.
    TSThisType,
    /// `any`
    TSAnyKeyword,
    /// `unknown`
    TSUnknownKeyword,
    /// `number`
    TSNumberKeyword,
    /// `string`
    TSStringKeyword,
    /// `boolean`
    TSBooleanKeyword,
    /// `void`
    TSVoidKeyword,
    /// `undefined`
    TSUndefinedKeyword,
    /// `null`
    TSNullKeyword,
    /// `never`
    TSNeverKeyword,
    /// `object`
    TSObjectKeyword,
}
