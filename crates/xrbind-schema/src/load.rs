//! # Document Loading
//!
//! Reads a bindings document into a `serde_json::Value`. The workspace
//! enables `serde_json/preserve_order`, so object keys keep document order
//! for both JSON and YAML input.

use std::path::Path;

use serde_json::Value;

use crate::validate::SchemaValidationError;

/// Serialization format of a bindings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (the default for any extension other than `.yaml`/`.yml`).
    Json,
    /// YAML.
    Yaml,
}

impl DocumentFormat {
    /// Choose the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse document text in the given format.
///
/// # Errors
///
/// Returns the parser's message on malformed input.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))
        }
    }
}

/// Read and parse a bindings document from disk.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or parsed.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;

    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "loading bindings document");

    parse_document(&content, format).map_err(|reason| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    })
}
