//! Programmatic tree construction.
//!
//! [`AstBuilder`] fills in `loc` from byte ranges so trees can be assembled
//! without a parser:
//!
//! ```
//! use lintkit_ast::{AstBuilder, SourceTree};
//!
//! let b = AstBuilder::new("foo();");
//! let call = b.call(0..5, b.identifier(0..3, "foo"), vec![], false);
//! let root = b.program(0..6, vec![b.expression_statement(0..6, call)]);
//! let tree = SourceTree::new(root).unwrap();
//! assert_eq!(tree.len(), 4);
//! ```

use crate::nodes::*;
use crate::schema::{BaseNode, Node};
use crate::span::{LineIndex, Span};
use std::sync::Arc;

/// Builds detached nodes for one source text.
#[derive(Debug, Clone)]
pub struct AstBuilder<'s> {
    index: LineIndex<'s>,
}

impl<'s> AstBuilder<'s> {
    /// Creates a builder for `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            index: LineIndex::new(source),
        }
    }

    /// Returns the source text.
    #[must_use]
    pub fn source(&self) -> &'s str {
        self.index.source()
    }

    /// Returns the span of the `nth` (0-based) occurrence of `needle`.
    #[must_use]
    pub fn find(&self, needle: &str, nth: usize) -> Option<Span> {
        let source = self.source();
        let start = source
            .match_indices(needle)
            .nth(nth)
            .map(|(start, _)| start)?;
        let start = u32::try_from(start).ok()?;
        let end = u32::try_from(needle.len()).ok()?.checked_add(start)?;
        Some(Span::new(start, end))
    }

    /// Returns base attributes for `range`.
    pub fn base(&self, range: impl Into<Span>) -> BaseNode {
        let range = range.into();
        BaseNode::new(range, self.index.location(range))
    }

    /// Wraps any node struct.
    pub fn node(&self, node: impl Into<Node>) -> Arc<Node> {
        Arc::new(node.into())
    }

    // ---- program and statements ----

    /// `Program`
    pub fn program(&self, range: impl Into<Span>, body: Vec<Arc<Node>>) -> Arc<Node> {
        self.node(Program {
            base: self.base(range),
            body,
            source_type: SourceType::Module,
        })
    }

    /// `expression;`
    pub fn expression_statement(&self, range: impl Into<Span>, expression: Arc<Node>) -> Arc<Node> {
        self.node(ExpressionStatement {
            base: self.base(range),
            expression,
            directive: None,
        })
    }

    /// A directive prologue entry such as `'use strict';`. `expression` must
    /// be the string literal.
    pub fn directive(
        &self,
        range: impl Into<Span>,
        expression: Arc<Node>,
        text: &str,
    ) -> Arc<Node> {
        self.node(ExpressionStatement {
            base: self.base(range),
            expression,
            directive: Some(text.to_string()),
        })
    }

    /// `{ body }`
    pub fn block(&self, range: impl Into<Span>, body: Vec<Arc<Node>>) -> Arc<Node> {
        self.node(BlockStatement {
            base: self.base(range),
            body,
        })
    }

    /// `;`
    pub fn empty_statement(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(EmptyStatement {
            base: self.base(range),
        })
    }

    /// `return argument;`
    pub fn return_statement(
        &self,
        range: impl Into<Span>,
        argument: Option<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(ReturnStatement {
            base: self.base(range),
            argument,
        })
    }

    /// `if (test) consequent else alternate`
    pub fn if_statement(
        &self,
        range: impl Into<Span>,
        test: Arc<Node>,
        consequent: Arc<Node>,
        alternate: Option<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(IfStatement {
            base: self.base(range),
            test,
            consequent,
            alternate,
        })
    }

    /// `kind declarations;`
    pub fn variable_declaration(
        &self,
        range: impl Into<Span>,
        kind: VariableKind,
        declarations: Vec<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(VariableDeclaration {
            base: self.base(range),
            declarations,
            kind,
            declare: false,
        })
    }

    /// `id = init`
    pub fn declarator(
        &self,
        range: impl Into<Span>,
        id: Arc<Node>,
        init: Option<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(VariableDeclarator {
            base: self.base(range),
            id,
            init,
            definite: false,
        })
    }

    /// `function id(params) body`
    pub fn function_declaration(
        &self,
        range: impl Into<Span>,
        id: Option<Arc<Node>>,
        params: Vec<Arc<Node>>,
        body: Arc<Node>,
    ) -> Arc<Node> {
        self.node(FunctionDeclaration {
            base: self.base(range),
            id,
            type_parameters: None,
            params,
            return_type: None,
            body,
            is_async: false,
            generator: false,
        })
    }

    /// `class id { members }`; `body_range` covers the braces.
    pub fn class_declaration(
        &self,
        range: impl Into<Span>,
        id: Option<Arc<Node>>,
        body_range: impl Into<Span>,
        members: Vec<Arc<Node>>,
    ) -> Arc<Node> {
        let body = self.node(ClassBody {
            base: self.base(body_range),
            body: members,
        });
        self.node(ClassDeclaration {
            base: self.base(range),
            id,
            type_parameters: None,
            super_class: None,
            super_type_arguments: None,
            body,
            is_abstract: false,
            declare: false,
        })
    }

    /// A class method; `value` must be a `FunctionExpression`.
    pub fn method(
        &self,
        range: impl Into<Span>,
        key: Arc<Node>,
        value: Arc<Node>,
        kind: MethodKind,
    ) -> Arc<Node> {
        self.node(MethodDefinition {
            base: self.base(range),
            key,
            value,
            kind,
            computed: false,
            is_static: false,
        })
    }

    // ---- expressions ----

    /// A plain identifier.
    pub fn identifier(&self, range: impl Into<Span>, name: &str) -> Arc<Node> {
        self.node(Identifier {
            base: self.base(range),
            name: name.to_string(),
            type_annotation: None,
            optional: false,
        })
    }

    /// An identifier with a type annotation, e.g. the `this: void` parameter.
    pub fn typed_identifier(
        &self,
        range: impl Into<Span>,
        name: &str,
        annotation: Arc<Node>,
    ) -> Arc<Node> {
        self.node(Identifier {
            base: self.base(range),
            name: name.to_string(),
            type_annotation: Some(annotation),
            optional: false,
        })
    }

    /// A string literal; `raw` keeps the quotes.
    pub fn string(&self, range: impl Into<Span>, value: &str) -> Arc<Node> {
        let range = range.into();
        let raw = self
            .source()
            .get(range.start as usize..range.end as usize)
            .map_or_else(|| format!("'{value}'"), str::to_string);
        self.node(Literal {
            base: self.base(range),
            value: LiteralValue::String(value.to_string()),
            raw,
        })
    }

    /// A numeric literal.
    pub fn number(&self, range: impl Into<Span>, value: f64) -> Arc<Node> {
        self.node(Literal {
            base: self.base(range),
            value: LiteralValue::Number(value),
            raw: value.to_string(),
        })
    }

    /// `this`
    pub fn this(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(ThisExpression {
            base: self.base(range),
        })
    }

    /// `[elements]`
    pub fn array(&self, range: impl Into<Span>, elements: Vec<Arc<Node>>) -> Arc<Node> {
        self.node(ArrayExpression {
            base: self.base(range),
            elements: elements.into_iter().map(Some).collect(),
        })
    }

    /// `{}`
    pub fn empty_object(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(ObjectExpression {
            base: self.base(range),
            properties: Vec::new(),
        })
    }

    /// `function id(params) body` in expression position.
    pub fn function_expression(
        &self,
        range: impl Into<Span>,
        id: Option<Arc<Node>>,
        params: Vec<Arc<Node>>,
        body: Arc<Node>,
    ) -> Arc<Node> {
        self.node(FunctionExpression {
            base: self.base(range),
            id,
            type_parameters: None,
            params,
            return_type: None,
            body,
            is_async: false,
            generator: false,
        })
    }

    /// `(params) => body`
    pub fn arrow(
        &self,
        range: impl Into<Span>,
        params: Vec<Arc<Node>>,
        body: Arc<Node>,
    ) -> Arc<Node> {
        let expression = body.kind() != crate::NodeKind::BlockStatement;
        self.node(ArrowFunctionExpression {
            base: self.base(range),
            type_parameters: None,
            params,
            return_type: None,
            body,
            expression,
            is_async: false,
        })
    }

    /// `` `raw` `` without substitutions.
    pub fn template(&self, range: impl Into<Span>, raw: &str) -> Arc<Node> {
        let range = range.into();
        let inner = Span::new(
            range.start.saturating_add(1),
            range.end.saturating_sub(1).max(range.start.saturating_add(1)),
        );
        let quasi = self.node(TemplateElement {
            base: self.base(inner),
            value: TemplateValue {
                raw: raw.to_string(),
                cooked: Some(raw.to_string()),
            },
            tail: true,
        });
        self.node(TemplateLiteral {
            base: self.base(range),
            quasis: vec![quasi],
            expressions: Vec::new(),
        })
    }

    /// ``tag`quasi` ``; `quasi` must be a `TemplateLiteral`.
    pub fn tagged_template(
        &self,
        range: impl Into<Span>,
        tag: Arc<Node>,
        quasi: Arc<Node>,
    ) -> Arc<Node> {
        self.node(TaggedTemplateExpression {
            base: self.base(range),
            tag,
            type_arguments: None,
            quasi,
        })
    }

    /// `operator argument`
    pub fn unary(
        &self,
        range: impl Into<Span>,
        operator: UnaryOperator,
        argument: Arc<Node>,
    ) -> Arc<Node> {
        self.node(UnaryExpression {
            base: self.base(range),
            operator,
            argument,
            prefix: true,
        })
    }

    /// `argument++` / `++argument`
    pub fn update(
        &self,
        range: impl Into<Span>,
        operator: UpdateOperator,
        argument: Arc<Node>,
        prefix: bool,
    ) -> Arc<Node> {
        self.node(UpdateExpression {
            base: self.base(range),
            operator,
            argument,
            prefix,
        })
    }

    /// `left operator right`
    pub fn binary(
        &self,
        range: impl Into<Span>,
        operator: BinaryOperator,
        left: Arc<Node>,
        right: Arc<Node>,
    ) -> Arc<Node> {
        self.node(BinaryExpression {
            base: self.base(range),
            operator,
            left,
            right,
        })
    }

    /// `left && right`, `left || right`, `left ?? right`
    pub fn logical(
        &self,
        range: impl Into<Span>,
        operator: LogicalOperator,
        left: Arc<Node>,
        right: Arc<Node>,
    ) -> Arc<Node> {
        self.node(LogicalExpression {
            base: self.base(range),
            operator,
            left,
            right,
        })
    }

    /// `left = right`
    pub fn assign(
        &self,
        range: impl Into<Span>,
        operator: AssignmentOperator,
        left: Arc<Node>,
        right: Arc<Node>,
    ) -> Arc<Node> {
        self.node(AssignmentExpression {
            base: self.base(range),
            operator,
            left,
            right,
        })
    }

    /// `test ? consequent : alternate`
    pub fn conditional(
        &self,
        range: impl Into<Span>,
        test: Arc<Node>,
        consequent: Arc<Node>,
        alternate: Arc<Node>,
    ) -> Arc<Node> {
        self.node(ConditionalExpression {
            base: self.base(range),
            test,
            consequent,
            alternate,
        })
    }

    /// `callee(arguments)` or `callee?.(arguments)`
    pub fn call(
        &self,
        range: impl Into<Span>,
        callee: Arc<Node>,
        arguments: Vec<Arc<Node>>,
        optional: bool,
    ) -> Arc<Node> {
        self.node(CallExpression {
            base: self.base(range),
            callee,
            type_arguments: None,
            arguments,
            optional,
        })
    }

    /// `new callee(arguments)`
    pub fn new_expression(
        &self,
        range: impl Into<Span>,
        callee: Arc<Node>,
        arguments: Vec<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(NewExpression {
            base: self.base(range),
            callee,
            type_arguments: None,
            arguments,
        })
    }

    /// `object.property` or `object?.property`
    pub fn member(
        &self,
        range: impl Into<Span>,
        object: Arc<Node>,
        property: Arc<Node>,
        optional: bool,
    ) -> Arc<Node> {
        self.node(MemberExpression {
            base: self.base(range),
            object,
            property,
            computed: false,
            optional,
        })
    }

    /// Wraps an optional chain.
    pub fn chain(&self, range: impl Into<Span>, expression: Arc<Node>) -> Arc<Node> {
        self.node(ChainExpression {
            base: self.base(range),
            expression,
        })
    }

    /// `a, b, c`
    pub fn sequence(&self, range: impl Into<Span>, expressions: Vec<Arc<Node>>) -> Arc<Node> {
        self.node(SequenceExpression {
            base: self.base(range),
            expressions,
        })
    }

    /// `import(source)`
    pub fn import(&self, range: impl Into<Span>, source: Arc<Node>) -> Arc<Node> {
        self.node(ImportExpression {
            base: self.base(range),
            source,
            options: None,
        })
    }

    /// `await argument`
    pub fn await_expression(&self, range: impl Into<Span>, argument: Arc<Node>) -> Arc<Node> {
        self.node(AwaitExpression {
            base: self.base(range),
            argument,
        })
    }

    /// `expression as Type`
    pub fn as_expression(
        &self,
        range: impl Into<Span>,
        expression: Arc<Node>,
        type_annotation: Arc<Node>,
    ) -> Arc<Node> {
        self.node(TSAsExpression {
            base: self.base(range),
            expression,
            type_annotation,
        })
    }

    /// `<Type>expression`
    pub fn type_assertion(
        &self,
        range: impl Into<Span>,
        type_annotation: Arc<Node>,
        expression: Arc<Node>,
    ) -> Arc<Node> {
        self.node(TSTypeAssertion {
            base: self.base(range),
            type_annotation,
            expression,
        })
    }

    /// `expression!`
    pub fn non_null(&self, range: impl Into<Span>, expression: Arc<Node>) -> Arc<Node> {
        self.node(TSNonNullExpression {
            base: self.base(range),
            expression,
        })
    }

    /// `expression<Args>`; `type_arguments` must be a
    /// `TSTypeParameterInstantiation`.
    pub fn instantiation(
        &self,
        range: impl Into<Span>,
        expression: Arc<Node>,
        type_arguments: Arc<Node>,
    ) -> Arc<Node> {
        self.node(TSInstantiationExpression {
            base: self.base(range),
            expression,
            type_arguments,
        })
    }

    // ---- types ----

    /// `: Type`
    pub fn type_annotation(&self, range: impl Into<Span>, ty: Arc<Node>) -> Arc<Node> {
        self.node(TSTypeAnnotation {
            base: self.base(range),
            type_annotation: ty,
        })
    }

    /// `<params>` supplied to a generic.
    pub fn type_arguments(&self, range: impl Into<Span>, params: Vec<Arc<Node>>) -> Arc<Node> {
        self.node(TSTypeParameterInstantiation {
            base: self.base(range),
            params,
        })
    }

    /// A reference to a named type.
    pub fn type_reference(&self, range: impl Into<Span>, name: Arc<Node>) -> Arc<Node> {
        self.node(TSTypeReference {
            base: self.base(range),
            type_name: name,
            type_arguments: None,
        })
    }

    /// `void`
    pub fn void_type(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(TSVoidKeyword {
            base: self.base(range),
        })
    }

    /// `any`
    pub fn any_type(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(TSAnyKeyword {
            base: self.base(range),
        })
    }

    /// `number`
    pub fn number_type(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(TSNumberKeyword {
            base: self.base(range),
        })
    }

    /// `string`
    pub fn string_type(&self, range: impl Into<Span>) -> Arc<Node> {
        self.node(TSStringKeyword {
            base: self.base(range),
        })
    }

    /// `import(argument).qualifier`
    pub fn import_type(
        &self,
        range: impl Into<Span>,
        argument: Arc<Node>,
        qualifier: Option<Arc<Node>>,
    ) -> Arc<Node> {
        self.node(TSImportType {
            base: self.base(range),
            argument,
            qualifier,
            type_arguments: None,
        })
    }

    /// `'text'` used as a type.
    pub fn literal_type(&self, range: impl Into<Span>, literal: Arc<Node>) -> Arc<Node> {
        self.node(TSLiteralType {
            base: self.base(range),
            literal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NodeKind;
    use crate::span::Position;

    #[test]
    fn base_computes_location() {
        let b = AstBuilder::new("a;\nfoo();");
        let base = b.base(3..8);
        assert_eq!(base.loc.start, Position::new(2, 0));
        assert_eq!(base.loc.end, Position::new(2, 5));
        assert!(base.id.is_detached());
    }

    #[test]
    fn find_locates_occurrences() {
        let b = AstBuilder::new("foo && foo?.();");
        assert_eq!(b.find("foo", 0), Some(Span::new(0, 3)));
        assert_eq!(b.find("foo", 1), Some(Span::new(7, 10)));
        assert_eq!(b.find("foo", 2), None);
    }

    #[test]
    fn string_keeps_raw_source() {
        let b = AstBuilder::new("'use strict';");
        let lit = b.string(0..12, "use strict");
        let lit = lit.downcast::<Literal>().expect("literal");
        assert_eq!(lit.raw, "'use strict'");
        assert_eq!(lit.as_str(), Some("use strict"));
    }

    #[test]
    fn arrow_marks_expression_bodies() {
        let b = AstBuilder::new("() => x");
        let arrow = b.arrow(0..7, vec![], b.identifier(6..7, "x"));
        assert_eq!(arrow.kind(), NodeKind::ArrowFunctionExpression);
        let arrow = arrow
            .downcast::<ArrowFunctionExpression>()
            .expect("arrow");
        assert!(arrow.expression);
    }
}
