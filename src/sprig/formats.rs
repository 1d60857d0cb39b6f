//! Output format implementations for AST serialization
//!
//! This module contains the text renderers for a parsed AST. Token and serde
//! based formats are selected in the processor.

pub mod source;
pub mod tag;
pub mod treeviz;

pub use source::generate_source;
pub use tag::{serialize_ast as serialize_ast_tag, serialize_ast_with_indent};
pub use treeviz::to_treeviz_str;
