//! Source code generation
//!
//! Renders an AST back to canonical sprig text by visiting it: top-level
//! expressions are separated by one space and calls are written as
//! `(head param...)`. Tokenizing and parsing the output yields the same AST.

use crate::sprig::ast::{Ast, Node};
use crate::sprig::traversal::{traverse, Visitor};

#[derive(Debug, Default)]
struct SourceGenerator {
    output: String,
    needs_space: bool,
}

impl SourceGenerator {
    fn write_item(&mut self, text: &str) {
        if self.needs_space {
            self.output.push(' ');
        }
        self.output.push_str(text);
        self.needs_space = true;
    }
}

impl Visitor for SourceGenerator {
    fn visit_number_literal(&mut self, node: &Node, _parent: &Node) {
        self.write_item(node.text().unwrap_or_default());
    }

    fn visit_word_operator(&mut self, node: &Node, _parent: &Node) {
        self.write_item(node.text().unwrap_or_default());
    }

    fn visit_call_expression(&mut self, node: &Node, _parent: &Node) {
        self.write_item("(");
        self.output.push_str(node.text().unwrap_or_default());
    }

    fn leave_call_expression(&mut self, _node: &Node, _parent: &Node) {
        self.output.push(')');
        self.needs_space = true;
    }
}

/// Generate sprig source text for `ast`
pub fn generate_source(ast: &Ast) -> String {
    let mut generator = SourceGenerator::default();
    traverse(ast, &mut generator);
    generator.output
}
