//! AST node types
//!
//! A sprig program is not a single expression but a sequence of sibling
//! top-level expressions. [`Ast`] keeps that sequence behind a synthetic
//! [`Node::Root`] that always sits at index 0 and acts as the parent of every
//! top-level node during traversal.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::sprig::error::TraversalError;

/// The recognized node kinds.
///
/// `Terminator` has no [`Node`] counterpart: it is the parser's stop signal
/// and never becomes part of a tree. It is still a kind handlers may be
/// registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    NumberLiteral,
    WordOperator,
    CallExpression,
    Root,
    Terminator,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::NumberLiteral,
        NodeKind::WordOperator,
        NodeKind::CallExpression,
        NodeKind::Root,
        NodeKind::Terminator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::NumberLiteral => "NumberLiteral",
            NodeKind::WordOperator => "WordOperator",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::Root => "Root",
            NodeKind::Terminator => "Terminator",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = TraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TraversalError::UnknownNodeKind {
                kind: s.to_string(),
            })
    }
}

/// A node of the syntax tree. Each node owns its subtree exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    Root,
    NumberLiteral {
        value: String,
    },
    WordOperator {
        value: String,
    },
    /// `(head param...)`: `head` is the text of the token right after `(`
    CallExpression {
        head: String,
        params: Vec<Node>,
    },
}

impl Node {
    pub fn number(value: impl Into<String>) -> Self {
        Node::NumberLiteral {
            value: value.into(),
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        Node::WordOperator {
            value: value.into(),
        }
    }

    pub fn call(head: impl Into<String>, params: Vec<Node>) -> Self {
        debug_assert!(
            !params.iter().any(Node::is_root),
            "Root cannot be a call param"
        );
        Node::CallExpression {
            head: head.into(),
            params,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Node::Root)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root => NodeKind::Root,
            Node::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Node::WordOperator { .. } => NodeKind::WordOperator,
            Node::CallExpression { .. } => NodeKind::CallExpression,
        }
    }

    /// The node's payload: literal text, or the head of a call
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Root => None,
            Node::NumberLiteral { value } | Node::WordOperator { value } => Some(value.as_str()),
            Node::CallExpression { head, .. } => Some(head.as_str()),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::CallExpression { params, .. } => params,
            _ => &[],
        }
    }

    /// Label used by the text renderers: `Kind` or `Kind text`
    pub fn display_label(&self) -> String {
        match self.text() {
            Some(text) => format!("{} {}", self.kind(), text),
            None => self.kind().to_string(),
        }
    }
}

// Dropping a deep chain of calls would otherwise recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::CallExpression { params, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(params);
        while let Some(mut node) = pending.pop() {
            if let Node::CallExpression { params, .. } = &mut node {
                pending.append(params);
            }
        }
    }
}

/// The parsed program: `Root` followed by zero or more top-level expressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ast {
    body: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self {
            body: vec![Node::Root],
        }
    }

    /// Build an AST from top-level expressions; the `Root` is added here
    pub fn from_expressions(expressions: Vec<Node>) -> Self {
        let mut ast = Self::new();
        for node in expressions {
            ast.push(node);
        }
        ast
    }

    /// Append a top-level expression. `Root` only ever sits at index 0.
    pub fn push(&mut self, node: Node) {
        debug_assert!(!node.is_root(), "Root cannot be a top-level expression");
        self.body.push(node);
    }

    /// The full body, `Root` included
    pub fn body(&self) -> &[Node] {
        &self.body
    }

    pub fn root(&self) -> &Node {
        &self.body[0]
    }

    /// The top-level expressions, without the leading `Root`
    pub fn expressions(&self) -> &[Node] {
        &self.body[1..]
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}
