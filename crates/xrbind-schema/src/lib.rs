//! # xrbind-schema — Bindings Document Loading & Validation
//!
//! Everything that stands between a bindings document on disk and a
//! [`Bindings`](xrbind_core::Bindings) model the emitters can trust.
//!
//! ## Stages
//!
//! 1. **Load** ([`load`]): read JSON, or YAML for `.yaml`/`.yml` files,
//!    into an order-preserving `serde_json::Value`.
//! 2. **Shape** ([`validate`]): validate the value against
//!    `schemas/bindings.schema.json` (Draft 2020-12). Violations carry the
//!    JSON Pointer of the offending field.
//! 3. **Semantics** ([`semantic`]): checks a schema cannot express:
//!    duplicate verify stems, one-sided sub-paths that match no hand,
//!    bindings whose enumerator prefix disagrees with the sub-path kind.
//! 4. **Coverage** ([`known`]): optionally compare every referenced
//!    enumerator against the runtime's own header, so a typo fails the build
//!    instead of silently falling back to the default enumerator.
//!
//! ## Crate Policy
//!
//! - Depends only on `xrbind-core` internally.
//! - Validation never mutates the document.

pub mod known;
pub mod load;
pub mod semantic;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use known::{KnownNames, UnknownName};
pub use load::{load_document, parse_document, DocumentFormat};
pub use semantic::{check_semantics, has_errors, SemanticIssue, Severity};
pub use validate::{
    SchemaValidationError, SchemaValidator, ValidationViolations, Violation, BINDINGS_SCHEMA_NAME,
};
