//! # List Subcommand
//!
//! Prints what the generator sees in a document: one line per profile,
//! and with `--paths` the length buckets its verify function switches on.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use xrbind_codegen::GeneratorConfig;
use xrbind_core::{PathBuckets, Profile};

use crate::{check_document, DocumentArgs};

/// Arguments for the `xrbind list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Also print every canonical path, grouped by byte length.
    #[arg(long)]
    pub paths: bool,

    /// Print a JSON summary instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Summary of one profile.
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    /// Interaction profile path.
    pub path: String,
    /// Human-readable title.
    pub title: String,
    /// Runtime device enumerator.
    pub device: String,
    /// Name of the generated verify function.
    pub verify_function: String,
    /// Number of binding templates the profile expands to.
    pub bindings: usize,
    /// Length buckets, only with `--paths`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<BucketSummary>>,
}

/// One `case` of a verify function.
#[derive(Debug, Serialize)]
pub struct BucketSummary {
    /// Byte length switched on.
    pub length: usize,
    /// Paths of that length, in comparison order.
    pub paths: Vec<String>,
}

impl ProfileSummary {
    fn new(profile: &Profile, config: &GeneratorConfig, with_paths: bool) -> Self {
        let buckets = with_paths.then(|| {
            PathBuckets::from_profile(profile)
                .iter()
                .map(|(length, paths)| BucketSummary {
                    length,
                    paths: paths.to_vec(),
                })
                .collect()
        });
        Self {
            path: profile.name.to_string(),
            title: profile.title.clone(),
            device: profile.monado_device.clone(),
            verify_function: format!(
                "{}{}_subpath",
                config.verify_prefix,
                profile.name.verify_stem()
            ),
            bindings: profile.components().len(),
            buckets,
        }
    }
}

/// Build the summaries `xrbind list` prints.
pub fn summarize(args: &ListArgs, config: &GeneratorConfig) -> Result<Vec<ProfileSummary>> {
    let checked = check_document(&args.document, config)?;
    checked.log_findings();
    Ok(checked
        .bindings
        .profiles()
        .iter()
        .map(|p| ProfileSummary::new(p, config, args.paths))
        .collect())
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, config: &GeneratorConfig) -> Result<u8> {
    let summaries = summarize(args, config)?;

    if args.json {
        let text =
            serde_json::to_string_pretty(&summaries).context("failed to serialize summary")?;
        println!("{text}");
        return Ok(0);
    }

    for summary in &summaries {
        println!(
            "{}  \"{}\"  {}  {} binding(s)  {}",
            summary.path, summary.title, summary.device, summary.bindings, summary.verify_function
        );
        for bucket in summary.buckets.iter().flatten() {
            println!("  case {}:", bucket.length);
            for path in &bucket.paths {
                println!("    {path}");
            }
        }
    }
    Ok(0)
}
