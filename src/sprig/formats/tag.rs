//! XML-like AST tag serialization
//!
//! Serializes the AST to an XML-like format that directly reflects its shape.
//!
//! ## Format
//!
//! - Node kind → tag name (`number`, `word`, `call`)
//! - Literal text → text content
//! - Call head → `head` attribute, params nested inside
//!
//! ## Example
//!
//! ```text
//! <ast>
//!   <call head="123">
//!     <number>234</number>
//!     <number>456</number>
//!   </call>
//!   <word>add</word>
//!   <call head="123"/>
//! </ast>
//! ```
//!
//! The lexical grammar admits only letters and digits in literals, so nothing
//! needs escaping.

use crate::sprig::ast::{Ast, Node};

/// Serialize an AST to tag format, indenting two spaces per level
pub fn serialize_ast(ast: &Ast) -> String {
    serialize_ast_with_indent(ast, "  ")
}

pub fn serialize_ast_with_indent(ast: &Ast, indent: &str) -> String {
    let mut result = String::new();
    if ast.expressions().is_empty() {
        result.push_str("<ast/>");
        return result;
    }

    result.push_str("<ast>\n");
    let mut pending: Vec<Tag> = ast
        .expressions()
        .iter()
        .rev()
        .map(|node| Tag::Open(node, 1))
        .collect();
    while let Some(tag) = pending.pop() {
        match tag {
            Tag::Open(node, level) => serialize_node(node, level, indent, &mut result, &mut pending),
            Tag::Close(level) => {
                result.push_str(&format!("{}</call>\n", indent.repeat(level)));
            }
        }
    }
    result.push_str("</ast>");
    result
}

/// Work left for the serializer: a node to open or a `</call>` to write
enum Tag<'a> {
    Open(&'a Node, usize),
    Close(usize),
}

/// Write the opening line of `node` and queue whatever belongs inside it
fn serialize_node<'a>(
    node: &'a Node,
    level: usize,
    indent: &str,
    output: &mut String,
    pending: &mut Vec<Tag<'a>>,
) {
    let pad = indent.repeat(level);

    match node {
        Node::NumberLiteral { value } => {
            output.push_str(&format!("{}<number>{}</number>\n", pad, value));
        }
        Node::WordOperator { value } => {
            output.push_str(&format!("{}<word>{}</word>\n", pad, value));
        }
        Node::CallExpression { head, params } if params.is_empty() => {
            output.push_str(&format!("{}<call head=\"{}\"/>\n", pad, head));
        }
        Node::CallExpression { head, params } => {
            output.push_str(&format!("{}<call head=\"{}\">\n", pad, head));
            pending.push(Tag::Close(level));
            pending.extend(params.iter().rev().map(|param| Tag::Open(param, level + 1)));
        }
        Node::Root => {}
    }
}
