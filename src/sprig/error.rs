//! Error types for every stage of the sprig pipeline
//!
//! Each stage fails fast: a stage either returns a complete, well-formed result
//! or one of these errors. Nothing is recovered and no partial output is handed
//! back.

use thiserror::Error;

use crate::sprig::lexer::TokenKind;
use crate::sprig::processor::ProcessingError;

/// Errors raised while tokenizing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character outside space, parentheses, ASCII letters and digits.
    /// `position` is the byte offset of the character in the input.
    #[error("invalid character {character:?} at offset {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Errors raised while building the AST. Positions are token indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token {kind} at token {position}")]
    UnexpectedToken { kind: TokenKind, position: usize },

    /// The call expression opened at `position` never found its `)`.
    #[error("unbalanced parentheses: '(' at token {position} is never closed")]
    UnbalancedParens { position: usize },

    /// The call opened at `position` sits deeper than `max_depth` levels.
    #[error("nesting too deep: '(' at token {position} exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { position: usize, max_depth: usize },
}

/// Errors raised while resolving traversal handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("unknown node kind: {kind}")]
    UnknownNodeKind { kind: String },
}

/// Crate-level error wrapping every stage
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
