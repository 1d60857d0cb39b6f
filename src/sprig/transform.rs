//! AST transformation
//!
//! Builds a new AST out of an existing one by registering handlers with the
//! traversal. The old tree is only borrowed; the new one is owned by the
//! caller and filled in by the handlers through closure capture.

use log::debug;
use std::cell::RefCell;

use crate::sprig::ast::{Ast, Node, NodeKind};
use crate::sprig::traversal::{traverse, Handlers};

/// Flatten `ast` into its literals.
///
/// The result is `Root` followed by a copy of every number and word literal in
/// pre-order. Calls contribute nothing themselves, but their params are still
/// visited.
pub fn flatten(ast: &Ast) -> Ast {
    let flattened = RefCell::new(Ast::new());
    let copy_literal = |node: &Node, _parent: &Node| flattened.borrow_mut().push(node.clone());

    let mut handlers = Handlers::new()
        .on(NodeKind::NumberLiteral, copy_literal)
        .on(NodeKind::WordOperator, copy_literal)
        .on(NodeKind::CallExpression, |_, _| {});
    traverse(ast, &mut handlers);
    drop(handlers);

    let flattened = flattened.into_inner();
    debug!(
        "flattened {} top-level expressions into {} literals",
        ast.expressions().len(),
        flattened.expressions().len()
    );
    flattened
}
