//! Implementation of the sprig lexer
//!
//! Classification is handled by logos; this module turns its output into
//! [`Token`]s and fails on the first character logos cannot classify.

use log::{debug, trace};
use logos::Logos;
use serde::Deserialize;

use crate::sprig::error::LexError;
use crate::sprig::lexer::tokens::{Token, TokenKind};

/// Knobs for the tokenizer, read from the `[lexer]` configuration table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// When false, `0` is not a digit and any `0` in the input is an invalid
    /// character, which is the digit set of the first sprig prototype.
    pub zero_is_digit: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            zero_is_digit: true,
        }
    }
}

/// Tokenize `source` with the default options
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, &LexerOptions::default())
}

/// Tokenize `source`, stopping at the first character that is not a space,
/// a parenthesis, an ASCII letter or a digit
pub fn tokenize_with(source: &str, options: &LexerOptions) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = result.map_err(|_| invalid_character(source, span.start))?;
        let text = lexer.slice();

        if kind == TokenKind::Number && !options.zero_is_digit {
            if let Some(offset) = text.find('0') {
                return Err(invalid_character(source, span.start + offset));
            }
        }

        trace!("token {} {:?} at {:?}", kind, text, span);
        tokens.push(Token::new(kind, text, span));
    }

    debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

fn invalid_character(source: &str, position: usize) -> LexError {
    let character = source[position..].chars().next().unwrap_or_default();
    LexError::InvalidCharacter {
        character,
        position,
    }
}
