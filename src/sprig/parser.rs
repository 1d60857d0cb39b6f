//! Parser for sprig
//!
//! Parsing works one logical unit at a time. [`parse_node`] consumes exactly one
//! literal or one fully parenthesized call starting at a token index and
//! reports the index the next call should resume from. [`generate_ast`] drives
//! it from index 0, threading each reported index into the next call, until the
//! parser answers [`Step::Terminator`]. The result is therefore a sequence of
//! sibling top-level expressions, not a single root expression.
//!
//! Grammar:
//!
//! ```text
//! program    := expression*
//! expression := NUMBER | WORD | call
//! call       := "(" (NUMBER | WORD) expression* ")"
//! ```

use log::{debug, trace};
use serde::Deserialize;

use crate::sprig::ast::{Ast, Node};
use crate::sprig::error::ParseError;
use crate::sprig::lexer::{Token, TokenKind};

/// Knobs for the parser, read from the `[parser]` configuration table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Stop one token before the end of the stream, as the first prototype
    /// did. A trailing single-token expression is then never parsed.
    pub stop_before_last_token: bool,
    /// Deepest call nesting accepted; a top-level call is at depth 1.
    ///
    /// Parsing and the tree walks use explicit stacks, but the serde formats
    /// and the derived `Clone`/`PartialEq` still recurse once per level.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            stop_before_last_token: false,
            max_depth: 256,
        }
    }
}

/// Outcome of one [`parse_node`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// One unit was parsed; resume at `next`
    Parsed { node: Node, next: usize },
    /// Nothing left to parse at this position
    Terminator,
}

/// Parse one unit starting at `position` with the default options
pub fn parse_node(tokens: &[Token], position: usize) -> Result<Step, ParseError> {
    parse_node_with(tokens, position, &ParserOptions::default())
}

pub fn parse_node_with(
    tokens: &[Token],
    position: usize,
    options: &ParserOptions,
) -> Result<Step, ParseError> {
    if at_end(tokens, position, options) {
        trace!("terminator at token {}", position);
        return Ok(Step::Terminator);
    }

    let token = &tokens[position];
    match token.kind {
        TokenKind::Number => Ok(Step::Parsed {
            node: Node::number(token.text.as_str()),
            next: position + 1,
        }),
        TokenKind::Word => Ok(Step::Parsed {
            node: Node::word(token.text.as_str()),
            next: position + 1,
        }),
        TokenKind::LeftParen => parse_call_expression(tokens, position, options),
        TokenKind::RightParen => Err(ParseError::UnexpectedToken {
            kind: token.kind,
            position,
        }),
    }
}

/// A call whose `)` has not been reached yet
struct OpenCall<'t> {
    open: usize,
    head: &'t str,
    params: Vec<Node>,
}

impl<'t> OpenCall<'t> {
    /// Start the call whose `(` sits at `open`, `depth` levels down
    fn start(
        tokens: &'t [Token],
        open: usize,
        depth: usize,
        options: &ParserOptions,
    ) -> Result<Self, ParseError> {
        if depth > options.max_depth {
            return Err(ParseError::NestingTooDeep {
                position: open,
                max_depth: options.max_depth,
            });
        }

        let head_position = open + 1;
        let head = token_at(tokens, head_position, open)?;
        if !head.kind.is_literal() {
            return Err(ParseError::UnexpectedToken {
                kind: head.kind,
                position: head_position,
            });
        }

        Ok(Self {
            open,
            head: head.text.as_str(),
            params: Vec::new(),
        })
    }

    fn finish(self) -> Node {
        Node::call(self.head, self.params)
    }
}

/// Parse `( head param... )` where `open` indexes the `(`.
///
/// Nested calls are kept on an explicit stack instead of the call stack, so
/// nesting depth is bounded only by `max_depth`.
fn parse_call_expression(
    tokens: &[Token],
    open: usize,
    options: &ParserOptions,
) -> Result<Step, ParseError> {
    let mut call = OpenCall::start(tokens, open, 1, options)?;
    let mut enclosing: Vec<OpenCall> = Vec::new();
    let mut current = open + 2;

    loop {
        let token = token_at(tokens, current, call.open)?;
        match token.kind {
            TokenKind::RightParen => {
                trace!(
                    "call {:?} with {} params spans tokens {}..={}",
                    call.head,
                    call.params.len(),
                    call.open,
                    current
                );
                current += 1;
                match enclosing.pop() {
                    Some(parent) => {
                        let finished = std::mem::replace(&mut call, parent);
                        call.params.push(finished.finish());
                    }
                    None => {
                        return Ok(Step::Parsed {
                            node: call.finish(),
                            next: current,
                        })
                    }
                }
            }
            // Only reachable when stopping early; the `)` was never seen
            _ if at_end(tokens, current, options) => {
                return Err(ParseError::UnbalancedParens {
                    position: call.open,
                })
            }
            TokenKind::LeftParen => {
                let inner = OpenCall::start(tokens, current, enclosing.len() + 2, options)?;
                enclosing.push(std::mem::replace(&mut call, inner));
                current += 2;
            }
            TokenKind::Number => {
                call.params.push(Node::number(token.text.as_str()));
                current += 1;
            }
            TokenKind::Word => {
                call.params.push(Node::word(token.text.as_str()));
                current += 1;
            }
        }
    }
}

fn at_end(tokens: &[Token], position: usize, options: &ParserOptions) -> bool {
    if options.stop_before_last_token {
        position + 1 >= tokens.len()
    } else {
        position >= tokens.len()
    }
}

/// Reading past the last token inside a call means its `)` is missing
fn token_at(tokens: &[Token], position: usize, open: usize) -> Result<&Token, ParseError> {
    tokens
        .get(position)
        .ok_or(ParseError::UnbalancedParens { position: open })
}

/// Build the AST for a whole token stream with the default options
pub fn generate_ast(tokens: &[Token]) -> Result<Ast, ParseError> {
    generate_ast_with(tokens, &ParserOptions::default())
}

pub fn generate_ast_with(tokens: &[Token], options: &ParserOptions) -> Result<Ast, ParseError> {
    let mut ast = Ast::new();
    let mut position = 0;

    while let Step::Parsed { node, next } = parse_node_with(tokens, position, options)? {
        ast.push(node);
        position = next;
    }

    debug!(
        "parsed {} tokens into {} top-level expressions",
        tokens.len(),
        ast.expressions().len()
    );
    Ok(ast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprig::lexer::tokenize;

    fn parse_str(source: &str) -> Result<Ast, ParseError> {
        generate_ast(&tokenize(source).unwrap())
    }

    #[test]
    fn test_empty_stream() {
        let ast = parse_str("").unwrap();
        assert_eq!(ast.body(), &[Node::Root]);
    }

    #[test]
    fn test_single_literal() {
        let ast = parse_str("42").unwrap();
        assert_eq!(ast.expressions(), &[Node::number("42")]);
    }

    #[test]
    fn test_parse_node_reports_next_position() {
        let tokens = tokenize("(add 1 2) x").unwrap();
        let step = parse_node(&tokens, 0).unwrap();
        assert_eq!(
            step,
            Step::Parsed {
                node: Node::call("add", vec![Node::number("1"), Node::number("2")]),
                next: 5
            }
        );
        assert_eq!(
            parse_node(&tokens, 5).unwrap(),
            Step::Parsed {
                node: Node::word("x"),
                next: 6
            }
        );
        assert_eq!(parse_node(&tokens, 6).unwrap(), Step::Terminator);
        assert_eq!(parse_node(&tokens, 60).unwrap(), Step::Terminator);
    }

    #[test]
    fn test_reference_expression() {
        let ast = parse_str("(123 234 456) add (123)").unwrap();
        assert_eq!(
            ast.expressions(),
            &[
                Node::call("123", vec![Node::number("234"), Node::number("456")]),
                Node::word("add"),
                Node::call("123", vec![]),
            ]
        );
        assert_eq!(ast.body()[0], Node::Root);
    }

    #[test]
    fn test_nested_calls_resume_after_child() {
        let ast = parse_str("(a (b 1 (c 2)) 3) d").unwrap();
        assert_eq!(
            ast.expressions(),
            &[
                Node::call(
                    "a",
                    vec![
                        Node::call("b", vec![Node::number("1"), Node::call("c", vec![Node::number("2")])]),
                        Node::number("3"),
                    ]
                ),
                Node::word("d"),
            ]
        );
    }

    #[test]
    fn test_stray_right_paren() {
        let err = parse_str("a )").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::RightParen,
                position: 1
            }
        );
    }

    #[test]
    fn test_extra_right_paren_after_call() {
        let err = parse_str("(a 1))").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::RightParen,
                position: 4
            }
        );
    }

    #[test]
    fn test_missing_close_paren() {
        assert_eq!(
            parse_str("(add 1 2").unwrap_err(),
            ParseError::UnbalancedParens { position: 0 }
        );
        assert_eq!(
            parse_str("x (add (sub 1) 2").unwrap_err(),
            ParseError::UnbalancedParens { position: 1 }
        );
    }

    #[test]
    fn test_lone_open_paren() {
        assert_eq!(
            parse_str("(").unwrap_err(),
            ParseError::UnbalancedParens { position: 0 }
        );
    }

    #[test]
    fn test_call_head_must_be_literal() {
        assert_eq!(
            parse_str("()").unwrap_err(),
            ParseError::UnexpectedToken {
                kind: TokenKind::RightParen,
                position: 1
            }
        );
        assert_eq!(
            parse_str("((a) b)").unwrap_err(),
            ParseError::UnexpectedToken {
                kind: TokenKind::LeftParen,
                position: 1
            }
        );
    }

    #[test]
    fn test_stop_before_last_token_drops_trailing_literal() {
        let options = ParserOptions {
            stop_before_last_token: true,
            ..ParserOptions::default()
        };
        let tokens = tokenize("(a) 5").unwrap();
        let ast = generate_ast_with(&tokens, &options).unwrap();
        assert_eq!(ast.expressions(), &[Node::call("a", vec![])]);

        let tokens = tokenize("42").unwrap();
        let ast = generate_ast_with(&tokens, &options).unwrap();
        assert!(ast.expressions().is_empty());

        let tokens = tokenize("(123 234 456) add (123)").unwrap();
        let ast = generate_ast_with(&tokens, &options).unwrap();
        assert_eq!(ast.expressions().len(), 3);
    }

    #[test]
    fn test_stop_before_last_token_inside_unclosed_call() {
        let options = ParserOptions {
            stop_before_last_token: true,
            ..ParserOptions::default()
        };
        let tokens = tokenize("(a 1").unwrap();
        assert_eq!(
            generate_ast_with(&tokens, &options).unwrap_err(),
            ParseError::UnbalancedParens { position: 0 }
        );
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(a ".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_up_to_max_depth() {
        let options = ParserOptions {
            max_depth: 3,
            ..ParserOptions::default()
        };
        let tokens = tokenize(&nested(3)).unwrap();
        assert!(generate_ast_with(&tokens, &options).is_ok());

        let tokens = tokenize(&nested(4)).unwrap();
        assert_eq!(
            generate_ast_with(&tokens, &options).unwrap_err(),
            ParseError::NestingTooDeep {
                position: 6,
                max_depth: 3
            }
        );
    }

    #[test]
    fn test_depth_counts_nesting_not_siblings() {
        let options = ParserOptions {
            max_depth: 2,
            ..ParserOptions::default()
        };
        let tokens = tokenize("(f (g 1) (g 2) (g 3)) (h (g 4))").unwrap();
        let ast = generate_ast_with(&tokens, &options).unwrap();
        assert_eq!(ast.expressions().len(), 2);
    }

    #[test]
    fn test_deep_nesting_is_rejected_by_default() {
        let err = parse_str(&nested(100_000)).unwrap_err();
        assert_eq!(
            err,
            ParseError::NestingTooDeep {
                position: 2 * 256,
                max_depth: 256
            }
        );
    }

    #[test]
    fn test_deep_nesting_parses_without_recursion() {
        let depth = 100_000;
        let options = ParserOptions {
            max_depth: depth,
            ..ParserOptions::default()
        };
        let tokens = tokenize(&nested(depth)).unwrap();
        let ast = generate_ast_with(&tokens, &options).unwrap();

        let mut levels = 0;
        let mut node = &ast.expressions()[0];
        while let Some(inner) = node.children().first() {
            levels += 1;
            node = inner;
        }
        assert_eq!(levels, depth);
        assert_eq!(node, &Node::number("1"));
    }

    #[test]
    fn test_unclosed_deep_call_reports_innermost_open() {
        let source = "(a ".repeat(5_000);
        let err = parse_str(&source).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { .. }));

        let options = ParserOptions {
            max_depth: 5_000,
            ..ParserOptions::default()
        };
        let tokens = tokenize(&source).unwrap();
        assert_eq!(
            generate_ast_with(&tokens, &options).unwrap_err(),
            ParseError::UnbalancedParens {
                position: 2 * 4_999
            }
        );
    }
}
