//! # xrbind-cli — Bindings Generator Command Line
//!
//! Provides the `xrbind` command, invoked by the runtime's build to turn
//! the interaction profile document into C.
//!
//! ## Subcommands
//!
//! - `xrbind generate`: validate the document, then write (or `--check`)
//!   every requested `*generated_bindings.c` / `*generated_bindings.h`.
//! - `xrbind validate`: run the checks only, without generating.
//! - `xrbind list`: summarize profiles and their verify-function buckets.
//!
//! ```bash
//! xrbind generate bindings.json b_generated_bindings.c b_generated_bindings.h
//! xrbind validate bindings.json --enum-header src/xrt/include/xrt/xrt_defines.h
//! xrbind --config xrbind.yaml generate bindings.json out/b_generated_bindings.c --check
//! ```
//!
//! Every subcommand runs the same [`check_document`] pipeline first, so
//! nothing is written unless `validate` would have passed.

pub mod generate;
pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use xrbind_codegen::GeneratorConfig;
use xrbind_core::{BindingNames, Bindings};
use xrbind_schema::{
    check_semantics, load_document, KnownNames, SchemaValidator, SemanticIssue, UnknownName,
};

/// Document arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Interaction profile document (JSON, or YAML for .yaml/.yml).
    #[arg(value_name = "BINDINGS")]
    pub bindings: PathBuf,

    /// Runtime header declaring the input/output enumerations. Every
    /// referenced enumerator must appear in it.
    #[arg(long, value_name = "HEADER")]
    pub enum_header: Option<PathBuf>,

    /// Directory holding bindings.schema.json, instead of the built-in schema.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}

/// A document that passed schema validation, with its remaining findings.
#[derive(Debug)]
pub struct CheckedDocument {
    /// The typed model.
    pub bindings: Bindings,
    /// Semantic findings, errors and warnings.
    pub issues: Vec<SemanticIssue>,
    /// Referenced enumerators missing from `--enum-header`.
    pub unknown: Vec<UnknownName>,
}

impl CheckedDocument {
    /// Findings that block generation.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count() + self.unknown.len()
    }

    /// Findings that are only logged.
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.is_error()).count()
    }

    /// Log every finding at its severity.
    pub fn log_findings(&self) {
        for issue in &self.issues {
            if issue.is_error() {
                tracing::error!("{issue}");
            } else {
                tracing::warn!("{issue}");
            }
        }
        for name in &self.unknown {
            tracing::error!("{name}");
        }
    }
}

/// Load the generator configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Load, schema-validate and semantically check a bindings document.
///
/// Schema violations and model errors are returned as `Err`; semantic
/// findings and unknown enumerators are collected for the caller to judge.
pub fn check_document(args: &DocumentArgs, config: &GeneratorConfig) -> Result<CheckedDocument> {
    let path = &args.bindings;
    let document =
        load_document(path).with_context(|| format!("failed to load {}", path.display()))?;

    let validator = match &args.schema_dir {
        Some(dir) => SchemaValidator::new(dir),
        None => SchemaValidator::embedded(),
    }
    .context("failed to load bindings schema")?;
    validator
        .validate_document(&document)
        .with_context(|| format!("{} does not match the bindings schema", path.display()))?;

    let bindings = Bindings::from_value(&document)
        .with_context(|| format!("failed to read profiles from {}", path.display()))?;

    let issues = check_semantics(&bindings, config.paths_per_binding_template);

    let unknown = match &args.enum_header {
        Some(header) => {
            let known = KnownNames::from_file(header)
                .with_context(|| format!("failed to scan {}", header.display()))?;
            if known.is_empty() {
                tracing::warn!(
                    header = %header.display(),
                    "enumerator header declares no XRT_INPUT_*/XRT_OUTPUT_* names"
                );
            }
            let names = BindingNames::collect(&bindings, &config.extra_inputs);
            known.unknown(&names)
        }
        None => Vec::new(),
    };

    tracing::debug!(
        document = %path.display(),
        profiles = bindings.len(),
        issues = issues.len(),
        unknown = unknown.len(),
        "checked bindings document"
    );

    Ok(CheckedDocument {
        bindings,
        issues,
        unknown,
    })
}
