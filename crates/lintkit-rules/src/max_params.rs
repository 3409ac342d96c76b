//! `max-params` for TypeScript: the base rule, optionally ignoring a
//! `this: void` pseudo-parameter.
//!
//! # Configuration
//!
//! - `max`: maximum number of parameters (default: 3)
//! - `maximum`: deprecated alias of `max`
//! - `countVoidThis`: count a leading `this: void` parameter (default: false)

use crate::base::{self, function_params, function_params_mut, FUNCTION_KINDS};
use lintkit_ast::{Node, NodeKind};
use lintkit_core::{
    CreateContext, HandlerMap, MessageTable, ResolvedOptions, Rule, RuleError, RuleMeta,
    RuleSchema, RuleType, Wrapper,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    #[serde(default)]
    count_void_this: bool,
}

/// Enforces a maximum number of parameters in function definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxParams {
    base: base::MaxParams,
}

impl MaxParams {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rule for MaxParams {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            RuleType::Suggestion,
            "Enforce a maximum number of parameters in function definitions",
        )
        .extends_base_rule()
    }

    fn schema(&self) -> RuleSchema {
        let limit = json!({"type": "integer", "minimum": 0});
        RuleSchema::slots([json!({
            "type": "object",
            "properties": {
                "max": limit,
                "maximum": limit,
                "countVoidThis": {"type": "boolean"}
            },
            "additionalProperties": false
        })])
    }

    fn messages(&self) -> MessageTable {
        self.base.messages()
    }

    fn default_options(&self) -> Vec<Value> {
        vec![json!({"max": 3, "countVoidThis": false})]
    }

    fn create(
        &self,
        ctx: &CreateContext<'_>,
        options: &ResolvedOptions,
    ) -> Result<HandlerMap, RuleError> {
        let handlers = self.base.create(ctx, options)?;
        let settings: Options = options.slot_or_default(0)?;
        if settings.count_void_this {
            debug!(rule = ctx.rule_name(), "countVoidThis set, using base handlers");
            return Ok(handlers);
        }
        handlers.wrap(Wrapper::on_enter(FUNCTION_KINDS).transform(remove_void_this_param))
    }
}

/// Returns a copy of `node` without its leading `this: void` parameter, if
/// it has one.
fn remove_void_this_param(node: &Node) -> Option<Node> {
    let Node::Identifier(first) = function_params(node)?.first()?.as_ref() else {
        return None;
    };
    if first.name != "this" {
        return None;
    }
    let Node::TSTypeAnnotation(annotation) = first.type_annotation.as_deref()? else {
        return None;
    };
    if annotation.type_annotation.kind() != NodeKind::TSVoidKeyword {
        return None;
    }
    let mut copy = node.clone();
    function_params_mut(&mut copy)?.remove(0);
    Some(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::{AstBuilder, FunctionDeclaration, SourceTree};
    use lintkit_tester::{ExpectedError, InvalidCase, RuleTester, ValidCase};

    // function foo(this: void, a, b, c) {}
    fn void_this(annotation: &str) -> SourceTree {
        let source = format!("function foo(this: {annotation}, a, b, c) {{}}");
        let b = AstBuilder::new(&source);
        let end = u32::try_from(source.len()).expect("short source");
        let ty_end = 19 + u32::try_from(annotation.len()).expect("short annotation");
        let ty = match annotation {
            "void" => b.void_type(19..ty_end),
            _ => b.any_type(19..ty_end),
        };
        let this = b.typed_identifier(13..ty_end, "this", b.type_annotation(17..ty_end, ty));
        let params = vec![
            this,
            b.identifier(ty_end + 2..ty_end + 3, "a"),
            b.identifier(ty_end + 5..ty_end + 6, "b"),
            b.identifier(ty_end + 8..ty_end + 9, "c"),
        ];
        let func = b.function_declaration(
            0..end,
            Some(b.identifier(9..12, "foo")),
            params,
            b.block(end - 2..end, vec![]),
        );
        SourceTree::new(b.program(0..end, vec![func])).expect("valid tree")
    }

    fn exceed(count: usize, max: usize) -> ExpectedError {
        ExpectedError::message(format!(
            "Function 'foo' has too many parameters ({count}). Maximum allowed is {max}."
        ))
    }

    #[test]
    fn void_this_is_not_counted_by_default() {
        RuleTester::new(MaxParams::new())
            .valid(ValidCase::new("default options", void_this("void")))
            .valid(
                ValidCase::new("explicit false", void_this("void"))
                    .options(vec![json!({"countVoidThis": false, "max": 3})]),
            )
            .invalid(
                InvalidCase::new("lower max", void_this("void"))
                    .options(vec![json!({"max": 2})])
                    .error(exceed(3, 2).at(1, 1)),
            )
            .run();
    }

    #[test]
    fn void_this_is_counted_when_enabled() {
        RuleTester::new(MaxParams::new())
            .invalid(
                InvalidCase::new("countVoidThis", void_this("void"))
                    .options(vec![json!({"countVoidThis": true})])
                    .error(exceed(4, 3)),
            )
            .run();
    }

    #[test]
    fn non_void_this_is_counted() {
        RuleTester::new(MaxParams::new())
            .invalid(InvalidCase::new("this: any", void_this("any")).error(exceed(4, 3)))
            .run();
    }

    #[test]
    fn transform_leaves_tree_untouched() {
        let tree = void_this("void");
        let function = tree
            .iter()
            .find(|n| n.kind() == NodeKind::FunctionDeclaration)
            .expect("function");
        let copy = remove_void_this_param(function).expect("this: void removed");
        assert_eq!(function_params(&copy).map(<[_]>::len), Some(3));
        assert_eq!(copy.id(), function.id());
        let original = function
            .downcast::<FunctionDeclaration>()
            .expect("declaration");
        assert_eq!(original.params.len(), 4);
    }

    #[test]
    fn metadata_extends_base() {
        let rule = MaxParams::new();
        assert!(rule.meta().extends_base_rule);
        assert_eq!(rule.name(), "max-params");
        assert_eq!(rule.messages(), base::MaxParams::new().messages());
        let options = lintkit_core::resolve_options(&rule, vec![]).expect("defaults");
        assert_eq!(options.raw(), [json!({"max": 3, "countVoidThis": false})]);
    }
}
