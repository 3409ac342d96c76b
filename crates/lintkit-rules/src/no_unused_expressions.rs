//! `no-unused-expressions` for TypeScript.
//!
//! Extends the base rule:
//!
//! - statements the parser marked as directives are never reported
//! - optional calls (`a?.b()`) and dynamic `import()` count as effects, also
//!   inside short-circuit and ternary expressions when those options are on
//! - type-only wrappers (`x as T`, `<T>x`, `x!`, `f<T>`) are unwrapped one
//!   level before the base rule judges the expression

use crate::base::{self, UnusedExpressionOptions};
use lintkit_ast::{Node, NodeKind};
use lintkit_core::{
    CreateContext, HandlerMap, MessageTable, ResolvedOptions, Rule, RuleError, RuleMeta,
    RuleSchema, RuleType, Wrapper,
};
use serde_json::Value;
use std::sync::Arc;

/// Disallows unused expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnusedExpressions {
    base: base::NoUnusedExpressions,
}

impl NoUnusedExpressions {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rule for NoUnusedExpressions {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta::new(RuleType::Suggestion, "Disallow unused expressions")
            .recommended()
            .extends_base_rule()
    }

    fn schema(&self) -> RuleSchema {
        RuleSchema::slots([UnusedExpressionOptions::schema()])
    }

    fn messages(&self) -> MessageTable {
        self.base.messages()
    }

    fn default_options(&self) -> Vec<Value> {
        vec![UnusedExpressionOptions::defaults()]
    }

    fn create(
        &self,
        ctx: &CreateContext<'_>,
        options: &ResolvedOptions,
    ) -> Result<HandlerMap, RuleError> {
        let handlers = self.base.create(ctx, options)?;
        let settings: UnusedExpressionOptions = options.slot_or_default(0)?;
        handlers.wrap(
            Wrapper::on_enter([NodeKind::ExpressionStatement])
                .filter(move |node, _| match node {
                    Node::ExpressionStatement(statement) => {
                        statement.directive.is_none()
                            && !is_valid_expression(&statement.expression, settings)
                    }
                    _ => true,
                })
                .transform(unwrap_type_expression),
        )
    }
}

fn is_valid_expression(expression: &Node, settings: UnusedExpressionOptions) -> bool {
    match expression {
        Node::LogicalExpression(logical) if settings.allow_short_circuit => {
            is_valid_expression(&logical.right, settings)
        }
        Node::ConditionalExpression(conditional) if settings.allow_ternary => {
            is_valid_expression(&conditional.alternate, settings)
                && is_valid_expression(&conditional.consequent, settings)
        }
        Node::ChainExpression(chain) => chain.expression.kind() == NodeKind::CallExpression,
        Node::ImportExpression(_) => true,
        _ => false,
    }
}

/// Replaces a statement's type-only expression wrapper by the wrapped
/// expression, in a copy.
fn unwrap_type_expression(node: &Node) -> Option<Node> {
    let Node::ExpressionStatement(statement) = node else {
        return None;
    };
    let inner = match statement.expression.as_ref() {
        Node::TSAsExpression(e) => &e.expression,
        Node::TSTypeAssertion(e) => &e.expression,
        Node::TSNonNullExpression(e) => &e.expression,
        Node::TSInstantiationExpression(e) => &e.expression,
        _ => return None,
    };
    let mut copy = statement.clone();
    copy.expression = Arc::clone(inner);
    Some(Node::ExpressionStatement(copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::{
        AstBuilder, LogicalOperator, ModuleKind, SourceTree, TSModuleBlock, TSModuleDeclaration,
    };
    use lintkit_tester::{ExpectedError, InvalidCase, RuleTester, ValidCase};
    use serde_json::json;

    const MESSAGE: &str = "Expected an assignment or function call and instead saw an expression.";

    fn single(source: &str, build: impl FnOnce(&AstBuilder<'_>) -> Arc<Node>) -> SourceTree {
        let b = AstBuilder::new(source);
        let end = u32::try_from(source.len()).expect("short source");
        let statement = b.expression_statement(0..end, build(&b));
        SourceTree::new(b.program(0..end, vec![statement])).expect("valid tree")
    }

    fn error() -> ExpectedError {
        ExpectedError::message(MESSAGE)
    }

    // a?.b;
    fn optional_member() -> SourceTree {
        single("a?.b;", |b| {
            b.chain(
                0..4,
                b.member(0..4, b.identifier(0..1, "a"), b.identifier(3..4, "b"), true),
            )
        })
    }

    // foo && foo?.();
    fn short_circuit_optional_call() -> SourceTree {
        single("foo && foo?.();", |b| {
            b.logical(
                0..14,
                LogicalOperator::And,
                b.identifier(0..3, "foo"),
                b.chain(
                    7..14,
                    b.call(7..14, b.identifier(7..10, "foo"), vec![], true),
                ),
            )
        })
    }

    // foo ? foo?.bar : bar.baz;
    fn ternary_members() -> SourceTree {
        single("foo ? foo?.bar : bar.baz;", |b| {
            b.conditional(
                0..24,
                b.identifier(0..3, "foo"),
                b.chain(
                    6..14,
                    b.member(
                        6..14,
                        b.identifier(6..9, "foo"),
                        b.identifier(11..14, "bar"),
                        true,
                    ),
                ),
                b.member(
                    17..24,
                    b.identifier(17..20, "bar"),
                    b.identifier(21..24, "baz"),
                    false,
                ),
            )
        })
    }

    #[test]
    fn optional_chains() {
        RuleTester::new(NoUnusedExpressions::new())
            .valid(ValidCase::new(
                "optional call",
                single("a?.b();", |b| {
                    b.chain(
                        0..6,
                        b.call(
                            0..6,
                            b.member(0..4, b.identifier(0..1, "a"), b.identifier(3..4, "b"), true),
                            vec![],
                            false,
                        ),
                    )
                }),
            ))
            .valid(
                ValidCase::new("short circuit optional call", short_circuit_optional_call())
                    .options(vec![json!({"allowShortCircuit": true})]),
            )
            .invalid(
                InvalidCase::new("optional member", optional_member())
                    .error(error().at(1, 1).end(1, 6)),
            )
            .invalid(
                InvalidCase::new("ternary with member branches", ternary_members())
                    .options(vec![json!({"allowTernary": true})])
                    .error(error().at(1, 1).end(1, 26)),
            )
            .run();
    }

    // import('<source>') starting at `start`
    fn import_call(b: &AstBuilder<'_>, source: &str, start: u32) -> Arc<Node> {
        let end = start + 15;
        b.import(start..end, b.string(start + 7..end - 1, source))
    }

    #[test]
    fn dynamic_import() {
        RuleTester::new(NoUnusedExpressions::new())
            .valid(ValidCase::new(
                "import",
                single("import('./foo');", |b| import_call(b, "./foo", 0)),
            ))
            .valid(
                ValidCase::new(
                    "ternary imports",
                    single("foo ? import('./foo') : import('./bar');", |b| {
                        b.conditional(
                            0..39,
                            b.identifier(0..3, "foo"),
                            import_call(b, "./foo", 6),
                            import_call(b, "./bar", 24),
                        )
                    }),
                )
                .options(vec![json!({"allowTernary": true})]),
            )
            .run();
    }

    // module Foo { 'use strict'; }
    fn module_with_string(directive: bool) -> SourceTree {
        let b = AstBuilder::new("module Foo { 'use strict'; }");
        let literal = b.string(13..25, "use strict");
        let statement = if directive {
            b.directive(13..26, literal, "use strict")
        } else {
            b.expression_statement(13..26, literal)
        };
        let module = b.node(TSModuleDeclaration {
            base: b.base(0..28),
            id: b.identifier(7..10, "Foo"),
            body: Some(b.node(TSModuleBlock {
                base: b.base(11..28),
                body: vec![statement],
            })),
            kind: ModuleKind::Module,
            declare: false,
        });
        SourceTree::new(b.program(0..28, vec![module])).expect("valid tree")
    }

    #[test]
    fn directives_are_exempt() {
        RuleTester::new(NoUnusedExpressions::new())
            .valid(ValidCase::new("module directive", module_with_string(true)))
            .invalid(
                InvalidCase::new("module string statement", module_with_string(false))
                    .error(error().at(1, 14).end(1, 27)),
            )
            .run();
    }

    #[test]
    fn type_wrappers_are_unwrapped() {
        RuleTester::new(NoUnusedExpressions::new())
            .invalid(
                InvalidCase::new(
                    "as expression",
                    single("foo as any;", |b| {
                        b.as_expression(0..10, b.identifier(0..3, "foo"), b.any_type(7..10))
                    }),
                )
                .error(error().at(1, 1).end(1, 12)),
            )
            .invalid(
                InvalidCase::new(
                    "type assertion",
                    single("<any>foo;", |b| {
                        b.type_assertion(0..8, b.any_type(1..4), b.identifier(5..8, "foo"))
                    }),
                )
                .error(error().at(1, 1).end(1, 10)),
            )
            .invalid(
                InvalidCase::new(
                    "non-null",
                    single("foo!;", |b| b.non_null(0..4, b.identifier(0..3, "foo"))),
                )
                .error(error().at(1, 1).end(1, 6)),
            )
            .invalid(
                InvalidCase::new(
                    "instantiation",
                    single("Map<string, string>;", |b| {
                        let args = b.type_arguments(
                            3..19,
                            vec![b.string_type(4..10), b.string_type(12..18)],
                        );
                        b.instantiation(0..19, b.identifier(0..3, "Map"), args)
                    }),
                )
                .error(error().at(1, 1).end(1, 21)),
            )
            .valid(ValidCase::new(
                "wrapped call",
                single("f()!;", |b| {
                    b.non_null(0..4, b.call(0..3, b.identifier(0..1, "f"), vec![], false))
                }),
            ))
            .run();
    }

    #[test]
    fn unwrapping_copies_the_statement() {
        let tree = single("foo!;", |b| b.non_null(0..4, b.identifier(0..3, "foo")));
        let statement = tree.root().children()[0];
        let copy = unwrap_type_expression(statement).expect("unwrapped");
        assert_eq!(copy.id(), statement.id());
        let Node::ExpressionStatement(copy) = copy else {
            panic!("expected a statement");
        };
        assert_eq!(copy.expression.kind(), NodeKind::Identifier);
        let Node::ExpressionStatement(original) = statement else {
            panic!("expected a statement");
        };
        assert_eq!(original.expression.kind(), NodeKind::TSNonNullExpression);
    }
}
