//! # Generate Subcommand
//!
//! Validates the document and renders every requested output. Output paths
//! choose their artifact by suffix (`generated_bindings.c` or
//! `generated_bindings.h`); other paths are skipped with a warning.
//!
//! With `--check` nothing is written and the exit code reports whether
//! the files on disk are current, for CI.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use xrbind_codegen::{write_outputs, GeneratorConfig, OutputStatus, WriteMode};

use crate::{check_document, DocumentArgs};

/// Arguments for the `xrbind generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Output files; the name decides what is generated.
    #[arg(value_name = "OUTPUT", required = true)]
    pub outputs: Vec<PathBuf>,

    /// Verify the outputs are up to date without writing.
    #[arg(long)]
    pub check: bool,
}

/// Execute the generate subcommand.
///
/// Returns exit code: 0 on success, 1 if `--check` finds a stale output.
/// Validation failures are returned as errors and nothing is written.
pub fn run_generate(args: &GenerateArgs, config: &GeneratorConfig) -> Result<u8> {
    let checked = check_document(&args.document, config)?;
    checked.log_findings();

    let errors = checked.error_count();
    if errors > 0 {
        bail!(
            "refusing to generate: {errors} error(s) in {}",
            args.document.bindings.display()
        );
    }

    let mode = if args.check {
        WriteMode::Check
    } else {
        WriteMode::Write
    };
    let reports = write_outputs(&checked.bindings, config, &args.outputs, mode)
        .context("failed to generate bindings")?;

    let mut stale = false;
    for report in &reports {
        let path = report.path.display();
        match report.status {
            OutputStatus::Written => println!("OK: wrote {path}"),
            OutputStatus::Unchanged => println!("OK: {path} is up to date"),
            OutputStatus::Stale => {
                println!("FAIL: {path} is missing or out of date");
                stale = true;
            }
            OutputStatus::Skipped => println!("SKIP: {path} is not a generated_bindings output"),
        }
    }

    Ok(u8::from(stale))
}
