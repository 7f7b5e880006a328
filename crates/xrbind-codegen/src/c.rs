//! # C Text Helpers
//!
//! String literal escaping and the banner placed at the top of every
//! generated file.

use std::fmt::{self, Write};

/// Escape `s` for use between double quotes in C source.
///
/// Backslash, double quote and the common control characters get their
/// short escapes; any other control character becomes a three-digit octal
/// escape, which cannot swallow a following digit. Non-ASCII text passes
/// through as UTF-8 so byte lengths stay equal to what `strlen` reports.
/// A `?` next to another `?` is written `\?`, so no trigraph survives.
pub fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut prev = None;
    while let Some(c) = chars.next() {
        match c {
            '?' if prev == Some('?') || chars.peek() == Some(&'?') => out.push_str("\\?"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                // Infallible: writing to a String.
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
        prev = Some(c);
    }
    out
}

/// Doxygen block at the top of a generated file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Banner<'a> {
    pub brief: &'a str,
    pub group: &'a str,
    pub spdx_license: Option<&'a str>,
}

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(spdx) = self.spdx_license {
            writeln!(f, "// SPDX-License-Identifier: {spdx}")?;
        }
        writeln!(f, "/*!")?;
        writeln!(f, " * @file")?;
        writeln!(f, " * @brief  {}.", self.brief)?;
        writeln!(f, " *")?;
        writeln!(f, " * Generated by xrbind from an interaction profile document.")?;
        writeln!(f, " * Do not edit: changes are lost on the next build.")?;
        writeln!(f, " *")?;
        writeln!(f, " * @ingroup {}", self.group)?;
        writeln!(f, " */")
    }
}
