//! Generic AST traversal
//!
//! [`traverse`] walks an [`Ast`] depth-first, pre-order, left to right, and
//! reports every node to a [`Visitor`] together with its parent. Top-level
//! expressions get the `Root` node as their parent; a call's params get the
//! call. Descending into a call's params is done by the walk itself, never by
//! the visitor, so a visitor that ignores calls still sees everything below
//! them.
//!
//! Later stages plug in either by implementing [`Visitor`] or by registering
//! closures per [`NodeKind`] in a [`Handlers`] map:
//!
//! ```ignore
//! let mut numbers = Vec::new();
//! let mut handlers = Handlers::new().on(NodeKind::NumberLiteral, |node, _parent| {
//!     numbers.push(node.text().unwrap_or_default().to_string());
//! });
//! traverse(&ast, &mut handlers);
//! ```

use log::trace;
use std::collections::HashMap;
use std::fmt;

use crate::sprig::ast::{Ast, Node, NodeKind};
use crate::sprig::error::TraversalError;

/// Visitor trait for traversing the AST
///
/// Each visit method corresponds to a node kind. Default implementations are
/// empty, so you only need to override the methods you care about.
pub trait Visitor {
    fn visit_number_literal(&mut self, _node: &Node, _parent: &Node) {}

    fn visit_word_operator(&mut self, _node: &Node, _parent: &Node) {}

    fn visit_call_expression(&mut self, _node: &Node, _parent: &Node) {}

    /// Called once all params of the call have been visited
    fn leave_call_expression(&mut self, _node: &Node, _parent: &Node) {}
}

/// Walk every top-level expression of `ast`, and everything below them
pub fn traverse(ast: &Ast, visitor: &mut dyn Visitor) {
    visit_children(visitor, ast.expressions(), ast.root());
}

/// Pending work of a walk
enum Visit<'a> {
    Enter { node: &'a Node, parent: &'a Node },
    Leave { node: &'a Node, parent: &'a Node },
}

/// Visit `nodes` in order, reporting `parent` as their parent.
///
/// The walk keeps its own stack, so arbitrarily deep trees are fine.
pub fn visit_children<'a>(visitor: &mut dyn Visitor, nodes: &'a [Node], parent: &'a Node) {
    let mut pending: Vec<Visit<'a>> = Vec::new();
    push_children(&mut pending, nodes, parent);

    while let Some(visit) = pending.pop() {
        match visit {
            Visit::Enter { node, parent } => {
                trace!(
                    "visiting {} (parent: {})",
                    node.display_label(),
                    parent.display_label()
                );
                match node {
                    Node::NumberLiteral { .. } => visitor.visit_number_literal(node, parent),
                    Node::WordOperator { .. } => visitor.visit_word_operator(node, parent),
                    Node::CallExpression { params, .. } => {
                        visitor.visit_call_expression(node, parent);
                        pending.push(Visit::Leave { node, parent });
                        push_children(&mut pending, params, node);
                    }
                    // `Ast` and `Node::call` keep Root out of the tree
                    Node::Root => trace!("skipping Root below the top of the tree"),
                }
            }
            Visit::Leave { node, parent } => visitor.leave_call_expression(node, parent),
        }
    }
}

/// Queue `nodes` so that the first one is popped first
fn push_children<'a>(pending: &mut Vec<Visit<'a>>, nodes: &'a [Node], parent: &'a Node) {
    pending.extend(
        nodes
            .iter()
            .rev()
            .map(|node| Visit::Enter { node, parent }),
    );
}

/// A handler receives the visited node and its parent
pub type Handler<'h> = Box<dyn FnMut(&Node, &Node) + 'h>;

/// A mapping from node kind to handler.
///
/// Kinds without a handler are skipped silently. Handlers for `Root` and
/// `Terminator` may be registered but are never invoked, since neither is
/// ever visited as a current node.
#[derive(Default)]
pub struct Handlers<'h> {
    handlers: HashMap<NodeKind, Handler<'h>>,
}

impl<'h> Handlers<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, replacing any previous one
    pub fn on<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: FnMut(&Node, &Node) + 'h,
    {
        self.register(kind, handler);
        self
    }

    /// Register `handler` under a kind name such as `"NumberLiteral"`.
    ///
    /// Fails with [`TraversalError::UnknownNodeKind`] when the name is not one
    /// of the recognized kinds; nothing is registered in that case.
    pub fn on_named<F>(self, name: &str, handler: F) -> Result<Self, TraversalError>
    where
        F: FnMut(&Node, &Node) + 'h,
    {
        let kind = name.parse::<NodeKind>()?;
        Ok(self.on(kind, handler))
    }

    pub fn register<F>(&mut self, kind: NodeKind, handler: F)
    where
        F: FnMut(&Node, &Node) + 'h,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    fn dispatch(&mut self, kind: NodeKind, node: &Node, parent: &Node) {
        if let Some(handler) = self.handlers.get_mut(&kind) {
            handler(node, parent);
        }
    }
}

impl fmt::Debug for Handlers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<_> = NodeKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .collect();
        f.debug_struct("Handlers")
            .field("registered", &registered)
            .finish()
    }
}

impl Visitor for Handlers<'_> {
    fn visit_number_literal(&mut self, node: &Node, parent: &Node) {
        self.dispatch(NodeKind::NumberLiteral, node, parent);
    }

    fn visit_word_operator(&mut self, node: &Node, parent: &Node) {
        self.dispatch(NodeKind::WordOperator, node, parent);
    }

    fn visit_call_expression(&mut self, node: &Node, parent: &Node) {
        self.dispatch(NodeKind::CallExpression, node, parent);
    }
}
