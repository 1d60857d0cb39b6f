//! Table-driven parser tests
//!
//! Each case tokenizes and parses a source string and checks either the shape
//! of the top-level sequence or the error raised.

use rstest::rstest;
use sprig::sprig::ast::Node;
use sprig::sprig::error::{Error, LexError, ParseError};
use sprig::sprig::lexer::TokenKind;
use sprig::sprig::parse;

fn labels(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(Node::display_label).collect()
}

#[rstest]
#[case("", &[])]
#[case("   ", &[])]
#[case("0", &["NumberLiteral 0"])]
#[case("42", &["NumberLiteral 42"])]
#[case("add", &["WordOperator add"])]
#[case("a b 1", &["WordOperator a", "WordOperator b", "NumberLiteral 1"])]
#[case("12ab", &["NumberLiteral 12", "WordOperator ab"])]
#[case("(add 1 2)", &["CallExpression add"])]
#[case("(add)", &["CallExpression add"])]
#[case("(123 234 456) add (123)", &["CallExpression 123", "WordOperator add", "CallExpression 123"])]
#[case("(a)(b)", &["CallExpression a", "CallExpression b"])]
fn test_top_level_sequence(#[case] source: &str, #[case] expected: &[&str]) {
    let ast = parse(source).unwrap();
    assert_eq!(labels(ast.expressions()), expected);
    assert_eq!(ast.body()[0], Node::Root);
}

#[rstest]
#[case("(add 1 2)", &["NumberLiteral 1", "NumberLiteral 2"])]
#[case("(f x (g y) 3)", &["WordOperator x", "CallExpression g", "NumberLiteral 3"])]
#[case("(f (g (h)))", &["CallExpression g"])]
#[case("(123 234 456)", &["NumberLiteral 234", "NumberLiteral 456"])]
fn test_call_params(#[case] source: &str, #[case] expected: &[&str]) {
    let ast = parse(source).unwrap();
    assert_eq!(labels(ast.expressions()[0].children()), expected);
}

#[rstest]
#[case(")", ParseError::UnexpectedToken { kind: TokenKind::RightParen, position: 0 })]
#[case("a b )", ParseError::UnexpectedToken { kind: TokenKind::RightParen, position: 2 })]
#[case("()", ParseError::UnexpectedToken { kind: TokenKind::RightParen, position: 1 })]
#[case("(( a))", ParseError::UnexpectedToken { kind: TokenKind::LeftParen, position: 1 })]
#[case("(", ParseError::UnbalancedParens { position: 0 })]
#[case("(a", ParseError::UnbalancedParens { position: 0 })]
#[case("(a (b 1)", ParseError::UnbalancedParens { position: 0 })]
#[case("x (a (b 1", ParseError::UnbalancedParens { position: 3 })]
fn test_parse_errors(#[case] source: &str, #[case] expected: ParseError) {
    match parse(source) {
        Err(Error::Parse(err)) => assert_eq!(err, expected),
        other => panic!("expected parse error for {:?}, got {:?}", source, other),
    }
}

#[rstest]
#[case("(a +)", '+', 3)]
#[case("a-b", '-', 1)]
#[case("(a\t1)", '\t', 2)]
#[case("(x 1.5)", '.', 4)]
fn test_lex_errors(#[case] source: &str, #[case] character: char, #[case] position: usize) {
    match parse(source) {
        Err(Error::Lex(err)) => assert_eq!(err, LexError::InvalidCharacter { character, position }),
        other => panic!("expected lex error for {:?}, got {:?}", source, other),
    }
}
