//! Command-line interface for sprig
//! This binary tokenizes and parses a sprig expression and prints it in one of the processing formats.
//!
//! Usage:
//!   sprig `<expression>` [--format `<format>`] [--config `<config>`]  - Process an expression
//!   sprig --file `<path>` [--format `<format>`]                       - Process a file
//!   sprig --list-formats                                            - List all available formats
//!
//! `--max-depth <n>` raises or lowers the nesting limit for either input.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;

use sprig::sprig::config::Loader;
use sprig::sprig::processor::{available_formats, process_file, process_source, ProcessingSpec};

fn main() {
    let matches = Command::new("sprig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize, parse and inspect sprig expressions")
        .arg_required_else_help(true)
        .arg(
            Arg::new("expression")
                .help("Sprig source to process, e.g. \"(add 1 2)\"")
                .index(1)
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('F')
                .help("Read the sprig source from a file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: output.format from the configuration, ast-tag)"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest call nesting to accept (default: parser.max_depth, 256)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return Ok(());
    }

    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let config = loader
        .with_cli_overrides(matches)
        .and_then(|loader| loader.build())
        .context("failed to load configuration")?;

    let format = &config.output.format;
    let spec = ProcessingSpec::from_string(format)
        .with_context(|| format!("unsupported format '{}'", format))?;
    debug!("processing with {}", spec);

    let output = match (
        matches.get_one::<String>("expression"),
        matches.get_one::<String>("file"),
    ) {
        (Some(expression), None) => process_source(expression, &spec, &config)?,
        (None, Some(path)) => {
            process_file(path, &spec, &config).with_context(|| format!("failed to process {}", path))?
        }
        _ => bail!("provide either an expression or --file <path>"),
    };

    println!("{}", output);
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
