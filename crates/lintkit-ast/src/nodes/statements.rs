//! Program, statement and declaration nodes.

use super::operators::{MethodKind, ModuleKind, SourceType, VariableKind};
use crate::schema::BaseNode;
use crate::Node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Top-level statements.
    #[serde(default)]
    pub body: Vec<Arc<Node>>,
    /// Script or module.
    #[serde(default)]
    pub source_type: SourceType,
}

/// An expression evaluated for its side effects, e.g. `foo();`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionStatement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// The evaluated expression.
    pub expression: Arc<Node>,
    /// Raw directive text (without quotes) when the statement belongs to a
    /// directive prologue, e.g. `use strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Statements of the block.
    #[serde(default)]
    pub body: Vec<Arc<Node>>,
}

/// A lone `;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyStatement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
}

/// `if (test) consequent else alternate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Condition.
    pub test: Arc<Node>,
    /// Branch taken when the condition holds.
    pub consequent: Arc<Node>,
    /// `else` branch.
    pub alternate: Option<Arc<Node>>,
}

/// `return argument;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Returned value.
    pub argument: Option<Arc<Node>>,
}

/// `let a = 1, b;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Declared bindings.
    #[serde(default)]
    pub declarations: Vec<Arc<Node>>,
    /// Declaration keyword.
    pub kind: VariableKind,
    /// `declare let ...`
    #[serde(default)]
    pub declare: bool,
}

/// One binding of a [`VariableDeclaration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Bound name or pattern.
    pub id: Arc<Node>,
    /// Initializer.
    pub init: Option<Arc<Node>>,
    /// Definite assignment assertion (`let x!: T`).
    #[serde(default)]
    pub definite: bool,
}

/// `function name(params) { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Function name; absent only for `export default function () {}`.
    pub id: Option<Arc<Node>>,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// Declared parameters, including a leading `this` parameter if written.
    #[serde(default)]
    pub params: Vec<Arc<Node>>,
    /// Return type annotation.
    pub return_type: Option<Arc<Node>>,
    /// Function body.
    pub body: Arc<Node>,
    /// `async function`
    #[serde(default, rename = "async")]
    pub is_async: bool,
    /// `function*`
    #[serde(default)]
    pub generator: bool,
}

/// `class Name extends Super { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Class name.
    pub id: Option<Arc<Node>>,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// `extends` clause.
    pub super_class: Option<Arc<Node>>,
    /// Type arguments of the `extends` clause.
    pub super_type_arguments: Option<Arc<Node>>,
    /// Class members.
    pub body: Arc<Node>,
    /// `abstract class`
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// `declare class`
    #[serde(default)]
    pub declare: bool,
}

/// Member list of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBody {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Methods and properties.
    #[serde(default)]
    pub body: Vec<Arc<Node>>,
}

/// A class method, getter, setter or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Method name.
    pub key: Arc<Node>,
    /// The method's function.
    pub value: Arc<Node>,
    /// Method kind.
    pub kind: MethodKind,
    /// `[key]() {}`
    #[serde(default)]
    pub computed: bool,
    /// `static`
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// A class field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Field name.
    pub key: Arc<Node>,
    /// Field type annotation.
    pub type_annotation: Option<Arc<Node>>,
    /// Initializer.
    pub value: Option<Arc<Node>>,
    /// `[key] = ...`
    #[serde(default)]
    pub computed: bool,
    /// `static`
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// `export <declaration>` or `export { ... } from 'source'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNamedDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Exported declaration.
    pub declaration: Option<Arc<Node>>,
    /// Re-export source module.
    pub source: Option<Arc<Node>>,
}

/// `module Foo {}`, `namespace Foo {}` or `declare global {}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSModuleDeclaration {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Module name.
    pub id: Arc<Node>,
    /// Module body; absent for `declare module 'foo';`.
    pub body: Option<Arc<Node>>,
    /// Introducing keyword.
    pub kind: ModuleKind,
    /// `declare module`
    #[serde(default)]
    pub declare: bool,
}

/// Body of a [`TSModuleDeclaration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSModuleBlock {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Statements of the module.
    #[serde(default)]
    pub body: Vec<Arc<Node>>,
}
