//! AST definitions for sprig
//!
//! ## Modules
//!
//! - `node` - the closed set of node kinds, the [`Node`] tree type and the
//!   [`Ast`] top-level sequence

pub mod node;

pub use node::{Ast, Node, NodeKind};
