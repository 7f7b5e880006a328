//! # Output Selection & Writing
//!
//! The build passes output paths and the file name decides what gets
//! rendered: a path ending in `generated_bindings.c` receives the source,
//! one ending in `generated_bindings.h` the header. Anything else is
//! skipped with a warning.
//!
//! Each artifact is rendered at most once per run, however many paths ask
//! for it. A file that already holds the rendered bytes is left untouched
//! so its modification time does not trigger needless rebuilds.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use xrbind_core::Bindings;

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::{header, source};

const SOURCE_SUFFIX: &str = "generated_bindings.c";
const HEADER_SUFFIX: &str = "generated_bindings.h";

/// Which artifact an output path receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputKind {
    /// `*generated_bindings.c`
    Source,
    /// `*generated_bindings.h`
    Header,
}

impl OutputKind {
    /// Select the artifact from the path's suffix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(SOURCE_SUFFIX) {
            Some(OutputKind::Source)
        } else if name.ends_with(HEADER_SUFFIX) {
            Some(OutputKind::Header)
        } else {
            None
        }
    }

    /// Render this artifact.
    ///
    /// # Errors
    ///
    /// As [`generate_source`](crate::generate_source) or
    /// [`generate_header`](crate::generate_header).
    pub fn render(
        self,
        bindings: &Bindings,
        config: &GeneratorConfig,
    ) -> Result<String, CodegenError> {
        match self {
            OutputKind::Source => source::generate_source(bindings, config),
            OutputKind::Header => header::generate_header(bindings, config),
        }
    }
}

/// Whether [`write_outputs`] may touch the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write every stale output.
    Write,
    /// Only compare; report stale outputs without writing.
    Check,
}

/// What happened to one requested output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// The file was missing or different and has been written.
    Written,
    /// The file already held the rendered bytes.
    Unchanged,
    /// Check mode: the file is missing or differs.
    Stale,
    /// The path matches no known artifact.
    Skipped,
}

/// Outcome for one requested output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    /// The requested path.
    pub path: PathBuf,
    /// The artifact selected for it, if any.
    pub kind: Option<OutputKind>,
    /// What happened.
    pub status: OutputStatus,
}

/// Render and write (or check) every requested output.
///
/// Rendering happens before any file is written, so a render failure
/// leaves every output untouched.
///
/// # Errors
///
/// Returns the first render error, or [`CodegenError::Io`] if an existing
/// output cannot be read or a new one cannot be written.
pub fn write_outputs(
    bindings: &Bindings,
    config: &GeneratorConfig,
    outputs: &[PathBuf],
    mode: WriteMode,
) -> Result<Vec<OutputReport>, CodegenError> {
    let mut rendered: BTreeMap<OutputKind, String> = BTreeMap::new();
    for kind in outputs.iter().filter_map(|p| OutputKind::from_path(p)) {
        if !rendered.contains_key(&kind) {
            rendered.insert(kind, kind.render(bindings, config)?);
        }
    }

    let mut reports = Vec::with_capacity(outputs.len());
    for path in outputs {
        let kind = OutputKind::from_path(path);
        let status = match kind.and_then(|k| rendered.get(&k)) {
            None => {
                tracing::warn!(
                    output = %path.display(),
                    "output name ends in neither {SOURCE_SUFFIX} nor {HEADER_SUFFIX}, skipping"
                );
                OutputStatus::Skipped
            }
            Some(content) => write_one(path, content, mode)?,
        };
        reports.push(OutputReport {
            path: path.clone(),
            kind,
            status,
        });
    }
    Ok(reports)
}

fn write_one(path: &Path, content: &str, mode: WriteMode) -> Result<OutputStatus, CodegenError> {
    let io_err = |source: std::io::Error| CodegenError::Io {
        path: path.display().to_string(),
        source,
    };

    let current = match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(io_err(e)),
    };
    if current.as_deref() == Some(content.as_bytes()) {
        tracing::debug!(output = %path.display(), "output is up to date");
        return Ok(OutputStatus::Unchanged);
    }

    match mode {
        WriteMode::Check => {
            tracing::debug!(output = %path.display(), exists = current.is_some(), "output is stale");
            Ok(OutputStatus::Stale)
        }
        WriteMode::Write => {
            std::fs::write(path, content).map_err(io_err)?;
            tracing::info!(output = %path.display(), bytes = content.len(), "wrote generated bindings");
            Ok(OutputStatus::Written)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings() -> Bindings {
        Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/simple_controller": {
                    "title": "Khronos Simple Controller",
                    "type": "khr_simple_controller",
                    "monado_device": "XRT_DEVICE_SIMPLE_CONTROLLER",
                    "subaction_paths": ["/user/hand/left", "/user/hand/right"],
                    "subpaths": {
                        "/input/select": {
                            "type": "button",
                            "localized_name": "Select",
                            "components": ["click"],
                            "monado_bindings": { "click": "XRT_INPUT_SIMPLE_SELECT_CLICK" }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn kind_from_suffix() {
        assert_eq!(
            OutputKind::from_path(Path::new("build/b_generated_bindings.c")),
            Some(OutputKind::Source)
        );
        assert_eq!(
            OutputKind::from_path(Path::new("generated_bindings.h")),
            Some(OutputKind::Header)
        );
        assert_eq!(OutputKind::from_path(Path::new("bindings.c")), None);
        assert_eq!(OutputKind::from_path(Path::new("generated_bindings.cpp")), None);
    }

    #[test]
    fn writes_then_leaves_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![
            dir.path().join("b_generated_bindings.c"),
            dir.path().join("b_generated_bindings.h"),
        ];
        let config = GeneratorConfig::default();

        let first = write_outputs(&bindings(), &config, &outputs, WriteMode::Write).unwrap();
        assert!(first.iter().all(|r| r.status == OutputStatus::Written));
        assert_eq!(first[0].kind, Some(OutputKind::Source));
        assert_eq!(first[1].kind, Some(OutputKind::Header));

        let source = std::fs::read_to_string(&outputs[0]).unwrap();
        assert!(source.contains("oxr_verify_khr_simple_controller_subpath"));

        let second = write_outputs(&bindings(), &config, &outputs, WriteMode::Write).unwrap();
        assert!(second.iter().all(|r| r.status == OutputStatus::Unchanged));
    }

    #[test]
    fn check_mode_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b_generated_bindings.h");
        std::fs::write(&path, "stale").unwrap();

        let reports = write_outputs(
            &bindings(),
            &GeneratorConfig::default(),
            &[path.clone(), dir.path().join("missing_generated_bindings.c")],
            WriteMode::Check,
        )
        .unwrap();
        assert!(reports.iter().all(|r| r.status == OutputStatus::Stale));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "stale");
        assert!(!dir.path().join("missing_generated_bindings.c").exists());
    }

    #[test]
    fn unknown_suffix_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let reports = write_outputs(
            &bindings(),
            &GeneratorConfig::default(),
            &[path.clone()],
            WriteMode::Write,
        )
        .unwrap();
        assert_eq!(reports[0].status, OutputStatus::Skipped);
        assert_eq!(reports[0].kind, None);
        assert!(!path.exists());
    }

    #[test]
    fn render_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![
            dir.path().join("b_generated_bindings.c"),
            dir.path().join("b_generated_bindings.h"),
        ];
        let empty = Bindings::from_value(&json!({ "profiles": {} })).unwrap();
        let err = write_outputs(&empty, &GeneratorConfig::default(), &outputs, WriteMode::Write)
            .unwrap_err();
        assert!(matches!(err, CodegenError::NoProfiles));
        assert!(outputs.iter().all(|p| !p.exists()));
    }

    #[test]
    fn missing_parent_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("b_generated_bindings.c");
        let err = write_outputs(&bindings(), &GeneratorConfig::default(), &[path], WriteMode::Write)
            .unwrap_err();
        assert!(matches!(err, CodegenError::Io { .. }));
    }
}
