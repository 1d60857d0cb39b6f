//! Token definitions for sprig
//!
//! Token classes are declared with the logos derive macro. A [`Token`] pairs the
//! class with the literal text it was cut from and its byte span in the input.

use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// All token classes in sprig
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r" +")]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    // A whole run of digits is one token
    #[regex(r"[0-9]+")]
    Number,

    // Letters of either case, also taken as a run
    #[regex(r"[a-zA-Z]+")]
    Word,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "left_paren",
            TokenKind::RightParen => "right_paren",
            TokenKind::Number => "number",
            TokenKind::Word => "word",
        }
    }

    /// Check if this token carries a literal (number or word)
    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Word)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexical unit: its class, literal text and byte span in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_literal() {
            write!(f, "{}({})", self.kind, self.text)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parens() {
        let mut lexer = TokenKind::lexer("()");
        assert_eq!(lexer.next(), Some(Ok(TokenKind::LeftParen)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::RightParen)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_runs_are_single_tokens() {
        let mut lexer = TokenKind::lexer("1234 abcXYZ");
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lexer.slice(), "1234");
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Word)));
        assert_eq!(lexer.slice(), "abcXYZ");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_digits_and_letters_split() {
        let mut lexer = TokenKind::lexer("12ab3");
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Word)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_tab_is_not_whitespace() {
        let mut lexer = TokenKind::lexer("\t");
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::new(TokenKind::Number, "42", 0..2).to_string(), "number(42)");
        assert_eq!(Token::new(TokenKind::Word, "add", 0..3).to_string(), "word(add)");
        assert_eq!(Token::new(TokenKind::LeftParen, "(", 0..1).to_string(), "left_paren");
    }

    #[test]
    fn test_literal_predicate() {
        assert!(TokenKind::Number.is_literal());
        assert!(TokenKind::Word.is_literal());
        assert!(!TokenKind::LeftParen.is_literal());
        assert!(!TokenKind::RightParen.is_literal());
    }
}
