//! Lexer module for sprig
//!
//! This module contains the tokenization logic for sprig, including token
//! definitions and the lexer implementation.
//!
//! The lexical grammar only knows four classes: `(`, `)`, runs of decimal
//! digits and runs of ASCII letters. Spaces separate tokens and produce none.
//! Anything else is rejected outright; there is no resynchronization.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with, LexerOptions};
pub use tokens::{Token, TokenKind};
