//! Processing API for sprig sources
//!
//! A processing spec is a `<stage>-<format>` string. The stage selects how far
//! the pipeline runs (tokens or AST) and the format selects the rendering:
//!
//! | spec          | output                                           |
//! |---------------|--------------------------------------------------|
//! | `token-simple`| `kind(text)` per token, space separated          |
//! | `token-json`  | pretty JSON array of tokens                      |
//! | `ast-tag`     | XML-like tags                                    |
//! | `ast-treeviz` | one line per node with box connectors            |
//! | `ast-json`    | pretty JSON of the AST                           |
//! | `ast-yaml`    | YAML of the AST                                  |
//! | `ast-source`  | regenerated canonical source                     |
//! | `ast-trace`   | one line per handler invocation during traversal |

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::sprig::ast::{Ast, Node, NodeKind};
use crate::sprig::config::SprigConfig;
use crate::sprig::error::Error;
use crate::sprig::formats;
use crate::sprig::lexer::{tokenize_with, Token};
use crate::sprig::parser::generate_ast_with;
use crate::sprig::traversal::{traverse, Handlers};

/// Represents the processing stage (how far the pipeline runs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Tag,
    Treeviz,
    Yaml,
    Source,
    Trace,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "tag" => OutputFormat::Tag,
            "treeviz" => OutputFormat::Treeviz,
            "yaml" => OutputFormat::Yaml,
            "source" => OutputFormat::Source,
            "trace" => OutputFormat::Trace,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "'{}' is not supported for the {} stage",
                spec.format_name(),
                spec.stage_name()
            )));
        }

        Ok(spec)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat as F;
        use ProcessingStage as S;

        [
            (S::Token, F::Simple),
            (S::Token, F::Json),
            (S::Ast, F::Tag),
            (S::Ast, F::Treeviz),
            (S::Ast, F::Json),
            (S::Ast, F::Yaml),
            (S::Ast, F::Source),
            (S::Ast, F::Trace),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }

    fn format_name(&self) -> &'static str {
        match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Tag => "tag",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Source => "source",
            OutputFormat::Trace => "trace",
        }
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stage_name(), self.format_name())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Run the pipeline over `source` and render the result
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &SprigConfig,
) -> Result<String, Error> {
    let tokens = tokenize_with(source, &config.lexer)?;

    match spec.stage {
        ProcessingStage::Token => Ok(format_tokens(&tokens, spec.format)?),
        ProcessingStage::Ast => {
            let ast = generate_ast_with(&tokens, &config.parser)?;
            Ok(format_ast(&ast, spec.format, config)?)
        }
    }
}

/// Read a sprig file and process it. One trailing line ending is dropped, as
/// editors usually add it.
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &SprigConfig,
) -> Result<String, Error> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|e| {
        ProcessingError::IoError(format!("{}: {}", file_path.display(), e))
    })?;

    let content = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(&content);
    process_source(content, spec, config)
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")),
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} is not supported for the token stage",
            other
        ))),
    }
}

/// Format an AST according to the specified format
fn format_ast(ast: &Ast, format: OutputFormat, config: &SprigConfig) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Tag => Ok(formats::serialize_ast_with_indent(ast, &config.output.indent)),
        OutputFormat::Treeviz => Ok(formats::to_treeviz_str(ast)),
        OutputFormat::Json => serde_json::to_string_pretty(ast)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(ast).map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        OutputFormat::Source => Ok(formats::generate_source(ast)),
        OutputFormat::Trace => Ok(trace_handlers(ast)),
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "simple is not supported for the ast stage".to_string(),
        )),
    }
}

/// Register a printing handler for every visitable kind and collect one line
/// per invocation
fn trace_handlers(ast: &Ast) -> String {
    let lines = RefCell::new(Vec::new());
    let print = |node: &Node, parent: &Node| {
        lines
            .borrow_mut()
            .push(format!("{} (parent: {})", node.display_label(), parent.display_label()));
    };

    let mut handlers = Handlers::new()
        .on(NodeKind::NumberLiteral, print)
        .on(NodeKind::WordOperator, print)
        .on(NodeKind::CallExpression, print);
    traverse(ast, &mut handlers);
    drop(handlers);

    lines.into_inner().join("\n")
}
