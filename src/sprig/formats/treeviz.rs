//! Treeviz formatter for AST nodes
//!
//! One line per node, nesting drawn with box connectors, two columns per
//! level:
//!
//! ```text
//! Root
//! ├─ CallExpression: 123
//! │ ├─ NumberLiteral: 234
//! │ └─ NumberLiteral: 456
//! ├─ WordOperator: add
//! └─ CallExpression: 123
//! ```
//!
//! Labels longer than 30 characters are truncated.

use crate::sprig::ast::{Ast, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Work left for the formatter
enum Line<'a> {
    Node { node: &'a Node, is_last: bool },
    /// Shorten the shared prefix back to this many bytes
    Restore(usize),
}

pub fn to_treeviz_str(ast: &Ast) -> String {
    let mut result = String::new();
    result.push_str(ast.root().kind().as_str());
    result.push('\n');

    let mut prefix = String::new();
    let mut pending = Vec::new();
    push_children(&mut pending, ast.expressions());

    while let Some(line) = pending.pop() {
        match line {
            Line::Node { node, is_last } => {
                let connector = if is_last { "└─" } else { "├─" };
                let label = truncate(node.text().unwrap_or_default(), 30);
                result.push_str(&format!("{}{} {}: {}\n", prefix, connector, node.kind(), label));

                if !node.children().is_empty() {
                    pending.push(Line::Restore(prefix.len()));
                    prefix.push_str(if is_last { "  " } else { "│ " });
                    push_children(&mut pending, node.children());
                }
            }
            Line::Restore(len) => prefix.truncate(len),
        }
    }
    result
}

fn push_children<'a>(pending: &mut Vec<Line<'a>>, children: &'a [Node]) {
    let last = children.len().saturating_sub(1);
    pending.extend(
        children
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| Line::Node {
                node,
                is_last: i == last,
            }),
    );
}
