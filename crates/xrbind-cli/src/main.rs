//! # xrbind CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xrbind_cli::generate::{run_generate, GenerateArgs};
use xrbind_cli::list::{run_list, ListArgs};
use xrbind_cli::load_config;
use xrbind_cli::validate::{run_validate, ValidateArgs};

/// Interaction profile bindings generator.
///
/// Reads a document describing every supported controller and emits the
/// C source and header the OpenXR runtime compiles to validate binding
/// paths and instantiate device templates.
#[derive(Parser, Debug)]
#[command(name = "xrbind", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML generator configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a bindings document and write the generated C outputs.
    Generate(GenerateArgs),

    /// Check a bindings document without generating anything.
    Validate(ValidateArgs),

    /// List the profiles of a bindings document.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("xrbind v{} starting", env!("CARGO_PKG_VERSION"));

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Generate(args) => run_generate(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::List(args) => run_list(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
