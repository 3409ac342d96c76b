//! Base `no-unused-expressions`: flags expression statements without effect.
//!
//! An expression statement is reported when its expression is one that
//! cannot have side effects (identifiers, literals, member reads, binary
//! operators, ...). Calls, assignments, `new`, updates, `await`, `yield`,
//! `import()` and `void`/`delete` are always allowed. Directive prologue
//! entries such as `'use strict';` are exempt.
//!
//! # Configuration
//!
//! - `allowShortCircuit`: judge `a && b()` by its right operand
//! - `allowTernary`: judge `a ? b() : c()` by both branches
//! - `allowTaggedTemplates`: allow tagged template statements

use lintkit_ast::{LiteralValue, Node, NodeKind, UnaryOperator, Union, VisitControl};
use lintkit_core::{
    CreateContext, HandlerMap, MessageTable, Report, ResolvedOptions, Rule, RuleContext,
    RuleError, RuleMeta, RuleSchema, RuleType,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Rule name for no-unused-expressions.
pub const NAME: &str = "no-unused-expressions";

pub(crate) const MESSAGES: MessageTable = MessageTable::new(&[(
    "unusedExpression",
    "Expected an assignment or function call and instead saw an expression.",
)]);

/// Options shared by the base rule and its extension.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UnusedExpressionOptions {
    pub(crate) allow_short_circuit: bool,
    pub(crate) allow_ternary: bool,
    pub(crate) allow_tagged_templates: bool,
}

impl UnusedExpressionOptions {
    pub(crate) fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "allowShortCircuit": {"type": "boolean"},
                "allowTernary": {"type": "boolean"},
                "allowTaggedTemplates": {"type": "boolean"}
            },
            "additionalProperties": false
        })
    }

    pub(crate) fn defaults() -> Value {
        json!({
            "allowShortCircuit": false,
            "allowTernary": false,
            "allowTaggedTemplates": false
        })
    }

    /// Returns true if `expression`, used as a statement, has no effect.
    fn is_disallowed(self, expression: &Node) -> bool {
        match expression {
            Node::ArrayExpression(_)
            | Node::ArrowFunctionExpression(_)
            | Node::BinaryExpression(_)
            | Node::ClassExpression(_)
            | Node::FunctionExpression(_)
            | Node::Identifier(_)
            | Node::Literal(_)
            | Node::MemberExpression(_)
            | Node::MetaProperty(_)
            | Node::ObjectExpression(_)
            | Node::SequenceExpression(_)
            | Node::TemplateLiteral(_)
            | Node::ThisExpression(_) => true,
            Node::ChainExpression(chain) => self.is_disallowed(&chain.expression),
            Node::ConditionalExpression(conditional) => {
                !self.allow_ternary
                    || self.is_disallowed(&conditional.consequent)
                    || self.is_disallowed(&conditional.alternate)
            }
            Node::LogicalExpression(logical) => {
                !self.allow_short_circuit || self.is_disallowed(&logical.right)
            }
            Node::TaggedTemplateExpression(_) => !self.allow_tagged_templates,
            Node::UnaryExpression(unary) => {
                !matches!(unary.operator, UnaryOperator::Void | UnaryOperator::Delete)
            }
            _ => false,
        }
    }
}

/// Disallows unused expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnusedExpressions;

impl NoUnusedExpressions {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoUnusedExpressions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta::new(RuleType::Suggestion, "Disallow unused expressions")
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::slots([UnusedExpressionOptions::schema()])
    }

    fn messages(&self) -> MessageTable {
        MESSAGES
    }

    fn default_options(&self) -> Vec<Value> {
        vec![UnusedExpressionOptions::defaults()]
    }

    fn create(
        &self,
        _ctx: &CreateContext<'_>,
        options: &ResolvedOptions,
    ) -> Result<HandlerMap, RuleError> {
        let options: UnusedExpressionOptions = options.slot_or_default(0)?;
        Ok(HandlerMap::new().on_enter(NodeKind::ExpressionStatement, move |node, ctx| {
            check_statement(node, ctx, options)
        }))
    }
}

fn check_statement(
    node: &Node,
    ctx: &mut RuleContext<'_>,
    options: UnusedExpressionOptions,
) -> Result<VisitControl, RuleError> {
    let Node::ExpressionStatement(statement) = node else {
        return Ok(VisitControl::Continue);
    };
    if options.is_disallowed(&statement.expression) && !is_directive(node, ctx) {
        ctx.report(Report::new(node, "unusedExpression"))?;
    }
    Ok(VisitControl::Continue)
}

/// Returns true if `statement` is part of the directive prologue of a
/// program or function body.
fn is_directive(statement: &Node, ctx: &RuleContext<'_>) -> bool {
    let Some(parent) = ctx.parent(statement) else {
        return false;
    };
    let body = match parent.as_ref() {
        Node::Program(program) => &program.body,
        Node::BlockStatement(block)
            if ctx
                .parent(parent)
                .is_some_and(|owner| owner.is(Union::FunctionLike)) =>
        {
            &block.body
        }
        _ => return false,
    };
    body.iter()
        .take_while(|s| is_string_statement(s))
        .any(|s| s.id() == statement.id())
}

fn is_string_statement(statement: &Node) -> bool {
    match statement {
        Node::ExpressionStatement(s) => matches!(
            s.expression.as_ref(),
            Node::Literal(literal) if matches!(literal.value, LiteralValue::String(_))
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::{AstBuilder, LogicalOperator, SourceTree};
    use lintkit_tester::{ExpectedError, InvalidCase, RuleTester, ValidCase};
    use std::sync::Arc;

    fn program(b: &AstBuilder<'_>, body: Vec<Arc<Node>>) -> SourceTree {
        let end = u32::try_from(b.source().len()).expect("short source");
        SourceTree::new(b.program(0..end, body)).expect("valid tree")
    }

    fn single(source: &str, build: impl FnOnce(&AstBuilder<'_>) -> Arc<Node>) -> SourceTree {
        let b = AstBuilder::new(source);
        let end = u32::try_from(source.len()).expect("short source");
        let statement = b.expression_statement(0..end, build(&b));
        program(&b, vec![statement])
    }

    fn unused() -> ExpectedError {
        ExpectedError::message_id("unusedExpression")
    }

    #[test]
    fn reports_expressions_without_effect() {
        RuleTester::new(NoUnusedExpressions::new())
            .invalid(
                InvalidCase::new("identifier", single("a;", |b| b.identifier(0..1, "a")))
                    .error(unused().at(1, 1).end(1, 3)),
            )
            .invalid(
                InvalidCase::new(
                    "sequence",
                    single("a, b();", |b| {
                        b.sequence(
                            0..6,
                            vec![
                                b.identifier(0..1, "a"),
                                b.call(3..6, b.identifier(3..4, "b"), vec![], false),
                            ],
                        )
                    }),
                )
                .error(unused().at(1, 1)),
            )
            .invalid(
                InvalidCase::new(
                    "short circuit without option",
                    single("a && b();", |b| {
                        b.logical(
                            0..8,
                            LogicalOperator::And,
                            b.identifier(0..1, "a"),
                            b.call(5..8, b.identifier(5..6, "b"), vec![], false),
                        )
                    }),
                )
                .error(unused()),
            )
            .invalid(
                InvalidCase::new(
                    "tagged template without option",
                    single("tag`x`;", |b| {
                        b.tagged_template(0..6, b.identifier(0..3, "tag"), b.template(3..6, "x"))
                    }),
                )
                .error(unused()),
            )
            .run();
    }

    #[test]
    fn allows_effects_and_enabled_forms() {
        RuleTester::new(NoUnusedExpressions::new())
            .valid(ValidCase::new(
                "call",
                single("f();", |b| b.call(0..3, b.identifier(0..1, "f"), vec![], false)),
            ))
            .valid(ValidCase::new(
                "void",
                single("void 0;", |b| b.unary(0..6, UnaryOperator::Void, b.number(5..6, 0.0))),
            ))
            .valid(
                ValidCase::new(
                    "short circuit",
                    single("a && b();", |b| {
                        b.logical(
                            0..8,
                            LogicalOperator::And,
                            b.identifier(0..1, "a"),
                            b.call(5..8, b.identifier(5..6, "b"), vec![], false),
                        )
                    }),
                )
                .options(vec![json!({"allowShortCircuit": true})]),
            )
            .valid(
                ValidCase::new(
                    "ternary",
                    single("a ? b() : c();", |b| {
                        b.conditional(
                            0..13,
                            b.identifier(0..1, "a"),
                            b.call(4..7, b.identifier(4..5, "b"), vec![], false),
                            b.call(10..13, b.identifier(10..11, "c"), vec![], false),
                        )
                    }),
                )
                .options(vec![json!({"allowTernary": true})]),
            )
            .valid(
                ValidCase::new(
                    "tagged template",
                    single("tag`x`;", |b| {
                        b.tagged_template(0..6, b.identifier(0..3, "tag"), b.template(3..6, "x"))
                    }),
                )
                .options(vec![json!({"allowTaggedTemplates": true})]),
            )
            .run();
    }

    // 'use strict'; 'use asm'; a; 'late';
    fn prologue() -> SourceTree {
        let b = AstBuilder::new("'use strict'; 'use asm'; a; 'late';");
        let body = vec![
            b.expression_statement(0..13, b.string(0..12, "use strict")),
            b.expression_statement(14..24, b.string(14..23, "use asm")),
            b.expression_statement(25..27, b.identifier(25..26, "a")),
            b.expression_statement(28..35, b.string(28..34, "late")),
        ];
        program(&b, body)
    }

    // function f() { 'use strict'; } { 'nested'; }
    fn nested_blocks() -> SourceTree {
        let b = AstBuilder::new("function f() { 'use strict'; } { 'nested'; }");
        let function = b.function_declaration(
            0..30,
            Some(b.identifier(9..10, "f")),
            vec![],
            b.block(
                13..30,
                vec![b.expression_statement(15..28, b.string(15..27, "use strict"))],
            ),
        );
        let block = b.block(
            31..44,
            vec![b.expression_statement(33..42, b.string(33..41, "nested"))],
        );
        program(&b, vec![function, block])
    }

    #[test]
    fn directive_prologue_is_exempt() {
        RuleTester::new(NoUnusedExpressions::new())
            .invalid(
                InvalidCase::new("program prologue", prologue())
                    .error(unused().at(1, 26))
                    .error(unused().at(1, 29).end(1, 36)),
            )
            .invalid(
                InvalidCase::new("function body only", nested_blocks())
                    .error(unused().at(1, 34)),
            )
            .run();
    }
}
