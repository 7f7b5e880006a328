//! # Validate Subcommand
//!
//! Runs the check pipeline without generating anything. With
//! `--enum-header` the runtime's enumerator coverage is checked too.

use anyhow::Result;
use clap::Args;

use xrbind_codegen::GeneratorConfig;

use crate::{check_document, DocumentArgs};

/// Arguments for the `xrbind validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the document is usable, 1 if it has errors (or
/// warnings under `--strict`).
pub fn run_validate(args: &ValidateArgs, config: &GeneratorConfig) -> Result<u8> {
    let checked = check_document(&args.document, config)?;
    let path = args.document.bindings.display();

    for issue in &checked.issues {
        println!("  {issue}");
    }
    for name in &checked.unknown {
        println!("  error: {name}");
    }

    let errors = checked.error_count();
    let warnings = checked.warning_count();
    let components: usize = checked
        .bindings
        .profiles()
        .iter()
        .map(|p| p.components().len())
        .sum();

    if errors > 0 || (args.strict && warnings > 0) {
        println!("FAIL: {path}: {errors} error(s), {warnings} warning(s)");
        return Ok(1);
    }

    println!(
        "OK: {path}: {} profile(s), {components} binding(s), {warnings} warning(s)",
        checked.bindings.len()
    );
    Ok(0)
}
