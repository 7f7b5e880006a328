//! # Schema Validation
//!
//! Validates bindings documents against `bindings.schema.json`
//! (Draft 2020-12) using the `jsonschema` crate.
//!
//! The schema ships in the repository under `schemas/` and is also compiled
//! into this crate, so the generator works from any build directory.
//! [`SchemaValidator::new`] loads an on-disk copy instead, which lets a
//! runtime carry a stricter schema without rebuilding the tool.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Filename of the bindings document schema.
pub const BINDINGS_SCHEMA_NAME: &str = "bindings.schema.json";

const EMBEDDED_BINDINGS_SCHEMA: &str = include_str!("../../../schemas/bindings.schema.json");

/// Error during loading or validating a bindings document.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validates bindings documents against a JSON schema.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    /// Schema filename, used in error messages.
    schema_name: String,
    /// Where the schema came from (`None` for the embedded copy).
    source: Option<PathBuf>,
    /// Parsed schema.
    schema: Value,
}

impl SchemaValidator {
    /// Use the schema compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the embedded
    /// schema is not valid JSON.
    pub fn embedded() -> Result<Self, SchemaValidationError> {
        let schema = serde_json::from_str(EMBEDDED_BINDINGS_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: BINDINGS_SCHEMA_NAME.to_string(),
                reason: format!("embedded schema is not valid JSON: {e}"),
            }
        })?;
        Ok(Self {
            schema_name: BINDINGS_SCHEMA_NAME.to_string(),
            source: None,
            schema,
        })
    }

    /// Load `bindings.schema.json` from `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot
    /// be read or parsed as JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let path = schema_dir.as_ref().join(BINDINGS_SCHEMA_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: path.display().to_string(),
                reason: format!("cannot read schema: {e}"),
            }
        })?;
        let schema = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: BINDINGS_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        tracing::debug!(schema = %path.display(), "loaded bindings schema");

        Ok(Self {
            schema_name: BINDINGS_SCHEMA_NAME.to_string(),
            source: Some(path),
            schema,
        })
    }

    /// Returns the schema filename.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Returns the on-disk schema path, or `None` for the embedded copy.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the parsed schema.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every violation
    /// if the document is invalid, or `ValidatorBuildError` if the schema
    /// itself does not compile.
    pub fn validate_document(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let validator = opts.build(&self.schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: self.schema_name.clone(),
                reason: e.to_string(),
            }
        })?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }
}
