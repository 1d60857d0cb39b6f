//! Configuration loading for the sprig toolchain.
//!
//! `defaults/sprig.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SprigConfig`].

use clap::ArgMatches;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::sprig::lexer::LexerOptions;
use crate::sprig::parser::ParserOptions;

const DEFAULT_TOML: &str = include_str!("../../defaults/sprig.default.toml");

/// Top-level configuration consumed by sprig applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SprigConfig {
    pub lexer: LexerOptions,
    pub parser: ParserOptions,
    pub output: OutputConfig,
}

/// Rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Default processing spec, e.g. `ast-tag`
    pub format: String,
    /// Indentation unit for the tag format
    pub indent: String,
}

/// Builds a [`SprigConfig`] from layered sources.
///
/// Later layers win: embedded defaults, then configuration files in the order
/// they were added, then explicit overrides and command-line flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer a TOML file, skipping it when absent
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        debug!("layering configuration file {}", path.display());
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set a single dotted key such as `parser.max_depth`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply the command-line flags that shadow configuration keys:
    /// `--format` sets `output.format` and `--max-depth` sets
    /// `parser.max_depth`. Flags the command does not define are ignored.
    pub fn with_cli_overrides(self, matches: &ArgMatches) -> Result<Self, ConfigError> {
        let mut loader = self;
        if let Some(format) = matches.try_get_one::<String>("format").ok().flatten() {
            loader = loader.set_override("output.format", format.as_str())?;
        }
        if let Some(depth) = matches.try_get_one::<usize>("max-depth").ok().flatten() {
            let depth = i64::try_from(*depth).unwrap_or(i64::MAX);
            loader = loader.set_override("parser.max_depth", depth)?;
        }
        Ok(loader)
    }

    pub fn build(self) -> Result<SprigConfig, ConfigError> {
        let config: SprigConfig = self.builder.build()?.try_deserialize()?;
        debug!(
            "configuration: format {}, max depth {}",
            config.output.format, config.parser.max_depth
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<SprigConfig, ConfigError> {
    Loader::new().build()
}
