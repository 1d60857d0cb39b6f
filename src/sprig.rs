//! Main module for sprig library functionality

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod transform;
pub mod traversal;

pub use error::Error;

/// Tokenize and parse `source` with the default options.
pub fn parse(source: &str) -> Result<ast::Ast, Error> {
    let tokens = lexer::tokenize(source)?;
    Ok(parser::generate_ast(&tokens)?)
}
