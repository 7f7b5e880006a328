//! # Runtime Enumerator Coverage
//!
//! The generated `xrt_*_name_enum` functions return a fallback enumerator
//! for any string they do not recognise, and a misspelt binding only shows
//! up as a C compile error if the runtime happens to compile the table.
//! Scanning the runtime's own definitions header for `XRT_INPUT_*` and
//! `XRT_OUTPUT_*` tokens closes that gap: every enumerator the document
//! references must appear there.
//!
//! The scan is token based. Comments are stripped first; macro helpers such
//! as `XRT_INPUT_NAME` are collected too, which is harmless.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use xrbind_core::{direction_of, BindingNames, Direction};

use crate::validate::SchemaValidationError;

/// Enumerators declared by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownNames {
    inputs: BTreeSet<String>,
    outputs: BTreeSet<String>,
}

/// A referenced enumerator the runtime does not declare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnknownName {
    /// Which enumeration it was looked up in.
    pub direction: Direction,
    /// The enumerator.
    pub name: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} enumerator '{}' is not declared by the runtime", self.direction, self.name)
    }
}

impl KnownNames {
    /// Collect enumerators from C header text.
    pub fn from_header(text: &str) -> Self {
        let mut known = Self::default();
        let code = strip_comments(text);
        for token in code.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
            match direction_of(token) {
                Some(Direction::Input) => {
                    known.inputs.insert(token.to_string());
                }
                Some(Direction::Output) => {
                    known.outputs.insert(token.to_string());
                }
                None => {}
            }
        }
        known
    }

    /// Read and scan a header file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentLoadError` if the file cannot
    /// be read.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read enumerator header: {e}"),
            }
        })?;
        let known = Self::from_header(&text);
        tracing::debug!(
            header = %path.display(),
            inputs = known.inputs.len(),
            outputs = known.outputs.len(),
            "scanned runtime enumerators"
        );
        Ok(known)
    }

    /// Returns true if the header declared nothing recognisable.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    /// Whether `name` is declared in the enumeration for `direction`.
    pub fn contains(&self, direction: Direction, name: &str) -> bool {
        match direction {
            Direction::Input => self.inputs.contains(name),
            Direction::Output => self.outputs.contains(name),
        }
    }

    /// Every referenced enumerator that is not declared, sorted.
    pub fn unknown(&self, names: &BindingNames) -> Vec<UnknownName> {
        let inputs = names
            .inputs()
            .filter(|n| !self.contains(Direction::Input, n))
            .map(|n| UnknownName {
                direction: Direction::Input,
                name: n.to_string(),
            });
        let outputs = names
            .outputs()
            .filter(|n| !self.contains(Direction::Output, n))
            .map(|n| UnknownName {
                direction: Direction::Output,
                name: n.to_string(),
            });
        inputs.chain(outputs).collect()
    }
}

/// Remove `//` and `/* */` comments. String literals are not special-cased.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match (c, next) {
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}
