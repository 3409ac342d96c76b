//! Base `max-params`: limits the number of parameters of a function.
//!
//! # Configuration
//!
//! Option slot 0 is either an integer limit or an object with `max` (or the
//! deprecated `maximum`). When both are given, `max` wins. Default: 3.

use lintkit_ast::{Literal, LiteralValue, MethodKind, Node, NodeKind, PropertyKind, VisitControl};
use lintkit_core::{
    CreateContext, HandlerMap, MessageTable, Report, ResolvedOptions, Rule, RuleContext,
    RuleError, RuleMeta, RuleSchema, RuleType,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Rule name for max-params.
pub const NAME: &str = "max-params";

const DEFAULT_MAX: usize = 3;

pub(crate) const MESSAGES: MessageTable = MessageTable::new(&[(
    "exceed",
    "{{name}} has too many parameters ({{count}}). Maximum allowed is {{max}}.",
)]);

/// Node kinds whose parameters are counted.
pub(crate) const FUNCTION_KINDS: [NodeKind; 3] = [
    NodeKind::FunctionDeclaration,
    NodeKind::FunctionExpression,
    NodeKind::ArrowFunctionExpression,
];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Limit {
    Count(usize),
    Object {
        #[serde(default)]
        max: Option<usize>,
        #[serde(default)]
        maximum: Option<usize>,
    },
}

impl Limit {
    fn value(&self) -> usize {
        match self {
            Self::Count(count) => *count,
            Self::Object { max, maximum } => max.or(*maximum).unwrap_or(DEFAULT_MAX),
        }
    }
}

/// Enforces a maximum number of parameters in function definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxParams;

impl MaxParams {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MaxParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            RuleType::Suggestion,
            "Enforce a maximum number of parameters in function definitions",
        )
    }

    fn schema(&self) -> RuleSchema {
        let limit = json!({"type": "integer", "minimum": 0});
        RuleSchema::slots([json!({
            "oneOf": [
                limit,
                {
                    "type": "object",
                    "properties": {"maximum": limit, "max": limit},
                    "additionalProperties": false
                }
            ]
        })])
    }

    fn messages(&self) -> MessageTable {
        MESSAGES
    }

    fn create(
        &self,
        _ctx: &CreateContext<'_>,
        options: &ResolvedOptions,
    ) -> Result<HandlerMap, RuleError> {
        let max = options
            .slot::<Limit>(0)?
            .map_or(DEFAULT_MAX, |limit| limit.value());
        Ok(FUNCTION_KINDS
            .into_iter()
            .fold(HandlerMap::new(), |handlers, kind| {
                handlers.on_enter(kind, move |node, ctx| check_function(node, ctx, max))
            }))
    }
}

fn check_function(
    node: &Node,
    ctx: &mut RuleContext<'_>,
    max: usize,
) -> Result<VisitControl, RuleError> {
    let Some(params) = function_params(node) else {
        return Ok(VisitControl::Continue);
    };
    if params.len() > max {
        let parent = ctx.parent(node).map(|parent| &**parent);
        let name = upper_case_first(&function_name_with_kind(node, parent));
        ctx.report(
            Report::new(node, "exceed")
                .data("name", name)
                .data("count", params.len().to_string())
                .data("max", max.to_string()),
        )?;
    }
    Ok(VisitControl::Continue)
}

/// Returns the parameters of a function-like node.
pub(crate) fn function_params(node: &Node) -> Option<&[Arc<Node>]> {
    match node {
        Node::FunctionDeclaration(f) => Some(&f.params),
        Node::FunctionExpression(f) => Some(&f.params),
        Node::ArrowFunctionExpression(f) => Some(&f.params),
        _ => None,
    }
}

/// Mutable access to the parameters of a function-like node.
pub(crate) fn function_params_mut(node: &mut Node) -> Option<&mut Vec<Arc<Node>>> {
    match node {
        Node::FunctionDeclaration(f) => Some(&mut f.params),
        Node::FunctionExpression(f) => Some(&mut f.params),
        Node::ArrowFunctionExpression(f) => Some(&mut f.params),
        _ => None,
    }
}

/// Describes a function the way messages refer to it, e.g.
/// `async function 'load'`, `arrow function` or `static method 'create'`.
fn function_name_with_kind(node: &Node, parent: Option<&Node>) -> String {
    let (id, is_async, generator) = match node {
        Node::FunctionDeclaration(f) => (f.id.as_deref(), f.is_async, f.generator),
        Node::FunctionExpression(f) => (f.id.as_deref(), f.is_async, f.generator),
        Node::ArrowFunctionExpression(f) => (None, f.is_async, false),
        _ => return String::new(),
    };

    let mut tokens: Vec<String> = Vec::new();
    match parent {
        Some(Node::MethodDefinition(m)) if m.is_static => tokens.push("static".into()),
        Some(Node::PropertyDefinition(p)) if p.is_static => tokens.push("static".into()),
        _ => {}
    }
    if is_async {
        tokens.push("async".into());
    }
    if generator {
        tokens.push("generator".into());
    }

    let key = match parent {
        Some(Node::MethodDefinition(m)) => {
            let kind = match m.kind {
                MethodKind::Constructor => return "constructor".into(),
                MethodKind::Get => "getter",
                MethodKind::Set => "setter",
                MethodKind::Method => "method",
            };
            tokens.push(kind.into());
            Some((m.key.as_ref(), m.computed))
        }
        Some(Node::Property(p)) => {
            let kind = match p.kind {
                PropertyKind::Get => "getter",
                PropertyKind::Set => "setter",
                PropertyKind::Init => "method",
            };
            tokens.push(kind.into());
            Some((p.key.as_ref(), p.computed))
        }
        Some(Node::PropertyDefinition(p)) => {
            tokens.push("method".into());
            Some((p.key.as_ref(), p.computed))
        }
        _ => {
            if node.kind() == NodeKind::ArrowFunctionExpression {
                tokens.push("arrow".into());
            }
            tokens.push("function".into());
            None
        }
    };

    let id_name = || match id {
        Some(Node::Identifier(ident)) => Some(ident.name.clone()),
        _ => None,
    };
    let name = match key {
        Some((key, computed)) => static_property_name(key, computed).or_else(id_name),
        None => id_name(),
    };
    if let Some(name) = name {
        tokens.push(format!("'{name}'"));
    }
    tokens.join(" ")
}

fn static_property_name(key: &Node, computed: bool) -> Option<String> {
    match key {
        Node::Identifier(ident) if !computed => Some(ident.name.clone()),
        Node::Literal(Literal {
            value: LiteralValue::String(value),
            ..
        }) => Some(value.clone()),
        Node::Literal(literal) => Some(literal.raw.clone()),
        _ => None,
    }
}

fn upper_case_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::{ArrowFunctionExpression, AstBuilder, MethodDefinition, SourceTree};
    use lintkit_tester::{ExpectedError, InvalidCase, RuleTester, ValidCase};

    /// `function foo(a, b, c, d) {}` with `count` parameters.
    fn declaration(count: usize) -> SourceTree {
        let names = ["a", "b", "c", "d", "e"];
        let list = names[..count].join(", ");
        let source = format!("function foo({list}) {{}}");
        let b = AstBuilder::new(&source);
        let params = (0u32..)
            .zip(&names[..count])
            .map(|(i, name)| b.identifier(13 + i * 3..14 + i * 3, name))
            .collect();
        let end = u32::try_from(source.len()).expect("short source");
        let func = b.function_declaration(
            0..end,
            Some(b.identifier(9..12, "foo")),
            params,
            b.block(end - 2..end, vec![]),
        );
        SourceTree::new(b.program(0..end, vec![func])).expect("valid tree")
    }

    // async (a, b) => {};
    fn async_arrow() -> SourceTree {
        let source = "async (a, b) => {};";
        let b = AstBuilder::new(source);
        let arrow = b.arrow(
            0..18,
            vec![b.identifier(7..8, "a"), b.identifier(10..11, "b")],
            b.block(16..18, vec![]),
        );
        let mut arrow = arrow
            .downcast::<ArrowFunctionExpression>()
            .expect("arrow")
            .clone();
        arrow.is_async = true;
        let arrow = b.node(arrow);
        SourceTree::new(b.program(0..19, vec![b.expression_statement(0..19, arrow)]))
            .expect("valid tree")
    }

    // class A { static make(a, b) {} }
    fn static_method() -> SourceTree {
        let source = "class A { static make(a, b) {} }";
        let b = AstBuilder::new(source);
        let value = b.function_expression(
            21..30,
            None,
            vec![b.identifier(22..23, "a"), b.identifier(25..26, "b")],
            b.block(28..30, vec![]),
        );
        let method = b.method(10..30, b.identifier(17..21, "make"), value, MethodKind::Method);
        let mut method = method
            .downcast::<MethodDefinition>()
            .expect("method")
            .clone();
        method.is_static = true;
        let method = b.node(method);
        let class = b.class_declaration(0..32, Some(b.identifier(6..7, "A")), 8..32, vec![method]);
        SourceTree::new(b.program(0..32, vec![class])).expect("valid tree")
    }

    #[test]
    fn counts_against_default_limit() {
        RuleTester::new(MaxParams::new())
            .valid(ValidCase::new("three params", declaration(3)))
            .invalid(
                InvalidCase::new("four params", declaration(4)).error(
                    ExpectedError::message(
                        "Function 'foo' has too many parameters (4). Maximum allowed is 3.",
                    )
                    .at(1, 1),
                ),
            )
            .run();
    }

    #[test]
    fn accepts_integer_and_object_limits() {
        RuleTester::new(MaxParams::new())
            .valid(ValidCase::new("integer", declaration(4)).options(vec![json!(4)]))
            .valid(ValidCase::new("max", declaration(5)).options(vec![json!({"max": 5})]))
            .valid(
                ValidCase::new("deprecated maximum", declaration(2))
                    .options(vec![json!({"maximum": 2})]),
            )
            .invalid(
                InvalidCase::new("max wins over maximum", declaration(2))
                    .options(vec![json!({"maximum": 5, "max": 1})])
                    .error(ExpectedError::message(
                        "Function 'foo' has too many parameters (2). Maximum allowed is 1.",
                    )),
            )
            .run();
    }

    #[test]
    fn names_functions_by_kind() {
        RuleTester::new(MaxParams::new())
            .invalid(
                InvalidCase::new("async arrow", async_arrow())
                    .options(vec![json!(1)])
                    .error(ExpectedError::message(
                        "Async arrow function has too many parameters (2). Maximum allowed is 1.",
                    )),
            )
            .invalid(
                InvalidCase::new("static method", static_method())
                    .options(vec![json!(1)])
                    .error(
                        ExpectedError::message(
                            "Static method 'make' has too many parameters (2). Maximum allowed is 1.",
                        )
                        .at(1, 22),
                    ),
            )
            .run();
    }

    #[test]
    fn rejects_invalid_options() {
        let failure = RuleTester::new(MaxParams::new())
            .valid(ValidCase::new("negative", declaration(1)).options(vec![json!(-1)]))
            .valid(
                ValidCase::new("unknown key", declaration(1)).options(vec![json!({"limit": 1})]),
            )
            .check()
            .expect_err("must fail");
        assert_eq!(failure.failures.len(), 2);
    }

    #[test]
    fn upper_cases_first_letter() {
        assert_eq!(upper_case_first("arrow function"), "Arrow function");
        assert_eq!(upper_case_first(""), "");
    }
}
