//! Handler maps and handler wrapping.
//!
//! A [`HandlerMap`] is what [`Rule::create`](crate::Rule::create) returns:
//! callbacks keyed by [`Selector`]. Extension rules derive their handlers from
//! a base rule's map with [`HandlerMap::wrap`], which decorates selected
//! handlers with a filter and a node transform.

use crate::context::RuleContext;
use crate::dispatch::{Phase, Selector};
use crate::rule::RuleError;
use lintkit_ast::{AstNode, Node, NodeKind, VisitControl};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// A node callback.
pub type Handler = Box<dyn FnMut(&Node, &mut RuleContext<'_>) -> Result<VisitControl, RuleError>>;

/// Boxes a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: FnMut(&Node, &mut RuleContext<'_>) -> Result<VisitControl, RuleError> + 'static,
{
    Box::new(f)
}

/// Callbacks of one rule for one traversal, keyed by selector.
///
/// Registering a second handler for a selector chains it after the first.
#[derive(Default)]
pub struct HandlerMap {
    handlers: BTreeMap<Selector, Handler>,
}

impl fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(ToString::to_string))
            .finish()
    }
}

impl HandlerMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `selector`.
    pub fn insert(&mut self, selector: Selector, handler: Handler) {
        let handler = match self.handlers.remove(&selector) {
            Some(existing) => chain(existing, handler),
            None => handler,
        };
        self.handlers.insert(selector, handler);
    }

    /// Registers an enter handler for `kind`.
    #[must_use]
    pub fn on_enter<F>(mut self, kind: NodeKind, f: F) -> Self
    where
        F: FnMut(&Node, &mut RuleContext<'_>) -> Result<VisitControl, RuleError> + 'static,
    {
        self.insert(Selector::enter(kind), handler(f));
        self
    }

    /// Registers an exit handler for `kind`.
    #[must_use]
    pub fn on_exit<F>(mut self, kind: NodeKind, f: F) -> Self
    where
        F: FnMut(&Node, &mut RuleContext<'_>) -> Result<VisitControl, RuleError> + 'static,
    {
        self.insert(Selector::exit(kind), handler(f));
        self
    }

    /// Registers a handler that receives the concrete node struct.
    #[must_use]
    pub fn on<T, F>(mut self, phase: Phase, mut f: F) -> Self
    where
        T: AstNode + 'static,
        F: FnMut(&T, &mut RuleContext<'_>) -> Result<VisitControl, RuleError> + 'static,
    {
        self.insert(
            Selector::new(T::KIND, phase),
            handler(move |node, ctx| match T::from_node(node) {
                Some(typed) => f(typed, ctx),
                None => Ok(VisitControl::Continue),
            }),
        );
        self
    }

    /// Returns true if a handler is registered for `selector`.
    #[must_use]
    pub fn contains(&self, selector: &Selector) -> bool {
        self.handlers.contains_key(selector)
    }

    /// Returns the handler for `selector`.
    pub fn get_mut(&mut self, selector: &Selector) -> Option<&mut Handler> {
        self.handlers.get_mut(selector)
    }

    /// Iterates over the registered selectors in order.
    pub fn selectors(&self) -> impl Iterator<Item = Selector> + '_ {
        self.handlers.keys().copied()
    }

    /// Returns the number of registered selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Calls the handler for `selector`. Returns `Ok(None)` when none is
    /// registered.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error.
    pub fn call(
        &mut self,
        selector: Selector,
        node: &Node,
        ctx: &mut RuleContext<'_>,
    ) -> Result<Option<VisitControl>, RuleError> {
        match self.handlers.get_mut(&selector) {
            Some(handler) => handler(node, ctx).map(Some),
            None => Ok(None),
        }
    }

    /// Adds every handler of `other`; shared selectors run `self`'s handler
    /// first.
    #[must_use]
    pub fn merge(mut self, other: HandlerMap) -> Self {
        for (selector, handler) in other.handlers {
            self.insert(selector, handler);
        }
        self
    }

    /// Decorates the handlers named by `wrapper`.
    ///
    /// Each wrapped handler runs, in order: the filter on the original node
    /// (a `false` result skips delegation), the transform (its shallow copy,
    /// if any, replaces the node), then the inner handler. Selectors the
    /// wrapper does not name are kept unchanged. Wrapping a wrapped map
    /// stacks: the last wrapper applied runs first.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MissingBaseHandler`] if the map has no handler for
    /// one of the wrapper's selectors.
    pub fn wrap(mut self, wrapper: Wrapper) -> Result<Self, RuleError> {
        if let Some(selector) = wrapper
            .selectors
            .iter()
            .find(|selector| !self.handlers.contains_key(selector))
        {
            return Err(RuleError::MissingBaseHandler {
                selector: *selector,
            });
        }
        for selector in &wrapper.selectors {
            let Some(mut inner) = self.handlers.remove(selector) else {
                continue;
            };
            debug!(%selector, "wrapping handler");
            let filter = wrapper.filter.clone();
            let transform = wrapper.transform.clone();
            let wrapped = handler(move |node, ctx| {
                if let Some(filter) = &filter {
                    if !filter(node, ctx) {
                        return Ok(VisitControl::Continue);
                    }
                }
                match transform.as_ref().and_then(|transform| transform(node)) {
                    Some(derived) => inner(&derived, ctx),
                    None => inner(node, ctx),
                }
            });
            self.handlers.insert(*selector, wrapped);
        }
        Ok(self)
    }
}

fn chain(mut first: Handler, mut second: Handler) -> Handler {
    handler(move |node, ctx| {
        let a = first(node, ctx)?;
        let b = second(node, ctx)?;
        if a == VisitControl::SkipChildren || b == VisitControl::SkipChildren {
            Ok(VisitControl::SkipChildren)
        } else {
            Ok(VisitControl::Continue)
        }
    })
}

type Filter = Rc<dyn Fn(&Node, &RuleContext<'_>) -> bool>;
type Transform = Rc<dyn Fn(&Node) -> Option<Node>>;

/// A decoration applied to some handlers of a [`HandlerMap`].
#[derive(Default, Clone)]
pub struct Wrapper {
    selectors: Vec<Selector>,
    filter: Option<Filter>,
    transform: Option<Transform>,
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("selectors", &self.selectors)
            .field("filter", &self.filter.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl Wrapper {
    /// Wraps the given selectors.
    #[must_use]
    pub fn new(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            selectors: selectors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Wraps the enter handlers of the given kinds.
    #[must_use]
    pub fn on_enter(kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        Self::new(kinds.into_iter().map(Selector::enter))
    }

    /// Sets the filter. Returning `false` suppresses the inner handler.
    #[must_use]
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Node, &RuleContext<'_>) -> bool + 'static,
    {
        self.filter = Some(Rc::new(f));
        self
    }

    /// Sets the transform. Returning a node passes that shallow copy to the
    /// inner handler instead of the original; `None` passes the original.
    #[must_use]
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Node) -> Option<Node> + 'static,
    {
        self.transform = Some(Rc::new(f));
        self
    }

    /// Returns the wrapped selectors.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{dispatch, RuleRun};
    use crate::options::ResolvedOptions;
    use crate::rule::MessageTable;
    use crate::types::Severity;
    use lintkit_ast::{AstBuilder, CallExpression, SourceTree};
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    // f(a, b, c);
    fn tree() -> SourceTree {
        let b = AstBuilder::new("f(a, b, c);");
        let call = b.call(
            0..10,
            b.identifier(0..1, "f"),
            vec![
                b.identifier(2..3, "a"),
                b.identifier(5..6, "b"),
                b.identifier(8..9, "c"),
            ],
            false,
        );
        SourceTree::new(b.program(0..11, vec![b.expression_statement(0..11, call)]))
            .expect("valid tree")
    }

    fn arg_counter(log: &Log, tag: &'static str) -> HandlerMap {
        let log = Rc::clone(log);
        HandlerMap::new().on::<CallExpression, _>(Phase::Enter, move |call, _| {
            log.borrow_mut()
                .push(format!("{tag}:{}", call.arguments.len()));
            Ok(VisitControl::Continue)
        })
    }

    fn drop_first_argument(node: &Node) -> Option<Node> {
        let mut call = node.downcast::<CallExpression>()?.clone();
        if call.arguments.is_empty() {
            return None;
        }
        call.arguments.remove(0);
        Some(Node::CallExpression(call))
    }

    fn run_map(tree: &SourceTree, handlers: HandlerMap) {
        let options = ResolvedOptions::default();
        let mut runs = [RuleRun {
            rule: "test",
            messages: MessageTable::new(&[]),
            severity: Severity::Error,
            options: &options,
            handlers,
        }];
        dispatch(tree, "t.ts", &mut runs, &mut Vec::new()).expect("dispatch");
    }

    #[test]
    fn transform_passes_shallow_copy_without_mutating_tree() {
        let tree = tree();
        let log: Log = Rc::default();
        let wrapped = arg_counter(&log, "inner")
            .wrap(Wrapper::on_enter([NodeKind::CallExpression]).transform(drop_first_argument))
            .expect("wrap");
        run_map(&tree, wrapped);
        assert_eq!(*log.borrow(), ["inner:2"]);

        let call = tree
            .iter()
            .find_map(|n| n.downcast::<CallExpression>())
            .expect("call");
        assert_eq!(call.arguments.len(), 3);
    }

    #[test]
    fn filter_suppresses_delegation() {
        let tree = tree();
        let log: Log = Rc::default();
        let wrapped = arg_counter(&log, "inner")
            .wrap(Wrapper::on_enter([NodeKind::CallExpression]).filter(|_, _| false))
            .expect("wrap");
        run_map(&tree, wrapped);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn filter_sees_original_node_before_transform() {
        let tree = tree();
        let log: Log = Rc::default();
        let seen = Rc::clone(&log);
        let wrapped = arg_counter(&log, "inner")
            .wrap(
                Wrapper::on_enter([NodeKind::CallExpression])
                    .filter(move |node, _| {
                        let count = node
                            .downcast::<CallExpression>()
                            .map_or(0, |c| c.arguments.len());
                        seen.borrow_mut().push(format!("filter:{count}"));
                        true
                    })
                    .transform(drop_first_argument),
            )
            .expect("wrap");
        run_map(&tree, wrapped);
        assert_eq!(*log.borrow(), ["filter:3", "inner:2"]);
    }

    #[test]
    fn stacked_wrappers_run_outermost_first() {
        let tree = tree();
        let log: Log = Rc::default();
        let (first, second) = (Rc::clone(&log), Rc::clone(&log));
        let wrapped = arg_counter(&log, "inner")
            .wrap(
                Wrapper::on_enter([NodeKind::CallExpression])
                    .filter(move |_, _| {
                        first.borrow_mut().push("layer1".into());
                        true
                    })
                    .transform(drop_first_argument),
            )
            .and_then(|map| {
                map.wrap(
                    Wrapper::on_enter([NodeKind::CallExpression])
                        .filter(move |_, _| {
                            second.borrow_mut().push("layer2".into());
                            true
                        })
                        .transform(drop_first_argument),
                )
            })
            .expect("wrap");
        run_map(&tree, wrapped);
        assert_eq!(*log.borrow(), ["layer2", "layer1", "inner:1"]);
    }

    #[test]
    fn unnamed_selectors_pass_through() {
        let tree = tree();
        let log: Log = Rc::default();
        let ident_log = Rc::clone(&log);
        let map = arg_counter(&log, "inner").on_enter(NodeKind::Identifier, move |_, _| {
            ident_log.borrow_mut().push("ident".into());
            Ok(VisitControl::Continue)
        });
        let wrapped = map
            .wrap(Wrapper::on_enter([NodeKind::CallExpression]).filter(|_, _| false))
            .expect("wrap");
        assert_eq!(wrapped.len(), 2);
        run_map(&tree, wrapped);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn wrapping_missing_selector_fails() {
        let log: Log = Rc::default();
        let err = arg_counter(&log, "inner")
            .wrap(Wrapper::on_enter([
                NodeKind::CallExpression,
                NodeKind::NewExpression,
            ]))
            .expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "cannot wrap `NewExpression`: the base rule has no handler for it"
        );
    }

    #[test]
    fn duplicate_registration_chains() {
        let tree = tree();
        let log: Log = Rc::default();
        let map = arg_counter(&log, "first").merge(arg_counter(&log, "second"));
        assert_eq!(map.len(), 1);
        run_map(&tree, map);
        assert_eq!(*log.borrow(), ["first:3", "second:3"]);
    }
}
