//! # sprig
//!
//! A front-end for the sprig s-expression language: a tokenizer, a
//! parser and a generic AST traversal that dispatches
//! per-node-kind handlers.
//!
//! ```text
//! "(add 1 2) foo"  --tokenize-->  [Token]  --generate_ast-->  Ast  --traverse-->  handlers
//! ```
//!
//! Later stages (transformation, code generation) plug into the traversal
//! through [`sprig::traversal::Handlers`] or the [`sprig::traversal::Visitor`]
//! trait without touching the walk itself.

pub mod sprig;
