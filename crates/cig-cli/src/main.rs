//! Cloud-init generator CLI
//!
//! Walks the user through customizing a controller cloud-init template and
//! writes the result next to the input.

mod cli;
mod error;
mod interactive;

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cig_core::{Generator, ScriptHasher};
use cig_fs::{NormalizedPath, io};
use cig_sso::ConnectorRegistry;

use cli::Cli;
use error::{CliError, Result};
use interactive::TerminalPrompter;

/// File name of the generated document, written beside the input.
const OUTPUT_FILE: &str = "generated-cloud-init.yaml";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let input = NormalizedPath::new(&cli.input);
    if !input.is_file() {
        return Err(CliError::user(format!("Input file not found: {}", input)));
    }
    let input = input.canonicalize()?;
    let document = io::read_text(&input)?;
    let registry = load_registry(&cli)?;
    tracing::debug!(
        input = %input,
        templates = %registry.templates_dir(),
        connectors = registry.len(),
        "starting generation"
    );

    let mut prompter = TerminalPrompter::new();
    let hasher = ScriptHasher::new(absolute(&cli.hash_script)?);
    let generated = Generator::new(&registry, &mut prompter, hasher).run(&document)?;

    let output = input.sibling(OUTPUT_FILE);
    io::write_text(&output, &generated)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\n{}", generated)?;
    writeln!(
        stdout,
        "\nProcessed cloud-config YAML has been written to {}",
        output.as_str().green()
    )?;
    Ok(())
}

/// `--verbose` logs everything at DEBUG; otherwise `RUST_LOG`, when set, picks
/// the filter. Logs go to stderr so stdout stays the generated document.
fn init_tracing(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_target(true)
        .with_writer(std::io::stderr);
    if verbose {
        let subscriber = builder.with_max_level(Level::DEBUG).finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    } else if std::env::var_os("RUST_LOG").is_some() {
        let subscriber = builder.with_env_filter(EnvFilter::from_default_env()).finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}

fn load_registry(cli: &Cli) -> Result<ConnectorRegistry> {
    let templates_dir = NormalizedPath::new(&cli.templates_dir);
    let registry = match &cli.connectors {
        Some(config) => ConnectorRegistry::from_config(templates_dir, &NormalizedPath::new(config))?,
        None => ConnectorRegistry::with_builtins(templates_dir),
    };
    Ok(registry)
}

/// The hash script is resolved against the working directory up front.
fn absolute(path: &std::path::Path) -> Result<std::path::PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
