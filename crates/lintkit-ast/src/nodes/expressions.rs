//! Expression nodes.

use super::operators::{
    AssignmentOperator, BinaryOperator, LogicalOperator, PropertyKind, UnaryOperator,
    UpdateOperator,
};
use crate::schema::BaseNode;
use crate::Node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A name, e.g. `foo`, or the `this` pseudo-parameter in `function f(this: void)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// The identifier text.
    pub name: String,
    /// Type annotation when used as a binding.
    pub type_annotation: Option<Arc<Node>>,
    /// `x?: T` in parameter position.
    #[serde(default)]
    pub optional: bool,
}

/// Value of a [`Literal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// `true` / `false`
    Boolean(bool),
    /// Numeric literal.
    Number(f64),
    /// String literal.
    String(String),
    /// `null`, and literals whose value is not representable (regex, bigint).
    Null,
}

/// A primitive literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Evaluated value.
    pub value: LiteralValue,
    /// Source text of the literal.
    #[serde(default)]
    pub raw: String,
}

impl Literal {
    /// Returns the string value if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// `this`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThisExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
}

/// `super`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Super {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
}

/// `[a, , ...b]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Elements; `None` marks a hole.
    #[serde(default)]
    pub elements: Vec<Option<Arc<Node>>>,
}

/// `{ a: 1, ...b }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Properties and spreads.
    #[serde(default)]
    pub properties: Vec<Arc<Node>>,
}

/// A property of an object literal or object pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Property name.
    pub key: Arc<Node>,
    /// Property value (or binding target in a pattern).
    pub value: Arc<Node>,
    /// Init, getter or setter.
    pub kind: PropertyKind,
    /// `[key]: value`
    #[serde(default)]
    pub computed: bool,
    /// `key() {}`
    #[serde(default)]
    pub method: bool,
    /// `{ key }`
    #[serde(default)]
    pub shorthand: bool,
}

/// `...argument` in an array, call or object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadElement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Spread value.
    pub argument: Arc<Node>,
}

/// `function (params) { body }` in expression position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Optional function name.
    pub id: Option<Arc<Node>>,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// Declared parameters.
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

/// `(params) => body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowFunctionExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// Declared parameters.
    #[serde(default)]
    pub params: Vec<Arc<Node>>,
    /// Return type annotation.
    pub return_type: Option<Arc<Node>>,
    /// Block or expression body.
    pub body: Arc<Node>,
    /// True when the body is an expression.
    #[serde(default)]
    pub expression: bool,
    /// `async () => {}`
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

/// `class {}` in expression position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Optional class name.
    pub id: Option<Arc<Node>>,
    /// Generic parameters.
    pub type_parameters: Option<Arc<Node>>,
    /// `extends` clause.
    pub super_class: Option<Arc<Node>>,
    /// Type arguments of the `extends` clause.
    pub super_type_arguments: Option<Arc<Node>>,
    /// Class members.
    pub body: Arc<Node>,
}

/// `` `a${b}c` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLiteral {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Literal chunks; always one more than `expressions`.
    #[serde(default)]
    pub quasis: Vec<Arc<Node>>,
    /// Interpolated expressions.
    #[serde(default)]
    pub expressions: Vec<Arc<Node>>,
}

/// Raw and cooked text of a [`TemplateElement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateValue {
    /// Text as written.
    pub raw: String,
    /// Text with escapes processed; `None` for invalid escapes in tagged templates.
    pub cooked: Option<String>,
}

/// One literal chunk of a [`TemplateLiteral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Chunk text.
    pub value: TemplateValue,
    /// True for the last chunk.
    #[serde(default)]
    pub tail: bool,
}

/// `` tag`...` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedTemplateExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Tag function.
    pub tag: Arc<Node>,
    /// `` tag<T>`...` ``
    pub type_arguments: Option<Arc<Node>>,
    /// The template.
    pub quasi: Arc<Node>,
}

/// `!x`, `typeof x`, `void x`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Operator.
    pub operator: UnaryOperator,
    /// Operand.
    pub argument: Arc<Node>,
    /// Always true for unary operators.
    #[serde(default = "default_true")]
    pub prefix: bool,
}

/// `x++`, `--x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Operator.
    pub operator: UpdateOperator,
    /// Operand.
    pub argument: Arc<Node>,
    /// `++x` versus `x++`.
    #[serde(default)]
    pub prefix: bool,
}

/// `a + b`, `a in b`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Operator.
    pub operator: BinaryOperator,
    /// Left operand.
    pub left: Arc<Node>,
    /// Right operand.
    pub right: Arc<Node>,
}

/// `a && b`, `a || b`, `a ?? b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Operator.
    pub operator: LogicalOperator,
    /// Left operand.
    pub left: Arc<Node>,
    /// Right operand, evaluated conditionally.
    pub right: Arc<Node>,
}

/// `a = b`, `a += b`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Operator.
    pub operator: AssignmentOperator,
    /// Assignment target.
    pub left: Arc<Node>,
    /// Assigned value.
    pub right: Arc<Node>,
}

/// `test ? consequent : alternate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Condition.
    pub test: Arc<Node>,
    /// Value when the condition holds.
    pub consequent: Arc<Node>,
    /// Value otherwise.
    pub alternate: Arc<Node>,
}

/// `callee(arguments)`, `callee?.(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Called expression.
    pub callee: Arc<Node>,
    /// `f<T>()`
    pub type_arguments: Option<Arc<Node>>,
    /// Arguments.
    #[serde(default)]
    pub arguments: Vec<Arc<Node>>,
    /// `?.(` call.
    #[serde(default)]
    pub optional: bool,
}

/// `new Callee(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Constructed expression.
    pub callee: Arc<Node>,
    /// `new Foo<T>()`
    pub type_arguments: Option<Arc<Node>>,
    /// Arguments.
    #[serde(default)]
    pub arguments: Vec<Arc<Node>>,
}

/// `object.property`, `object[property]`, `object?.property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Accessed object.
    pub object: Arc<Node>,
    /// Accessed property.
    pub property: Arc<Node>,
    /// `object[property]`
    #[serde(default)]
    pub computed: bool,
    /// `?.` access.
    #[serde(default)]
    pub optional: bool,
}

/// Wrapper around an optional chain such as `a?.b.c()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Outermost element of the chain.
    pub expression: Arc<Node>,
}

/// `a, b, c`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Expressions in evaluation order.
    #[serde(default)]
    pub expressions: Vec<Arc<Node>>,
}

/// Dynamic `import(source, options)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Module specifier.
    pub source: Arc<Node>,
    /// Import attributes argument.
    pub options: Option<Arc<Node>>,
}

/// `await argument`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwaitExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Awaited value.
    pub argument: Arc<Node>,
}

/// `yield argument`, `yield* argument`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Yielded value.
    pub argument: Option<Arc<Node>>,
    /// `yield*`
    #[serde(default)]
    pub delegate: bool,
}

/// `new.target`, `import.meta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaProperty {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// `new` or `import`.
    pub meta: Arc<Node>,
    /// `target` or `meta`.
    pub property: Arc<Node>,
}

/// `expression as Type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSAsExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Asserted expression.
    pub expression: Arc<Node>,
    /// Target type.
    pub type_annotation: Arc<Node>,
}

/// `<Type>expression`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSTypeAssertion {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Target type.
    pub type_annotation: Arc<Node>,
    /// Asserted expression.
    pub expression: Arc<Node>,
}

/// `expression!`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSNonNullExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Asserted expression.
    pub expression: Arc<Node>,
}

/// `expression<TypeArguments>` without a call, e.g. `Map<string, string>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TSInstantiationExpression {
    /// Shared node attributes.
    #[serde(flatten)]
    pub base: BaseNode,
    /// Instantiated expression.
    pub expression: Arc<Node>,
    /// Type arguments.
    pub type_arguments: Arc<Node>,
}

fn default_true() -> bool {
    true
}
