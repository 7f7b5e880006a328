//! # xrbind-codegen — C Emitters for Interaction Profile Bindings
//!
//! Renders a [`Bindings`](xrbind_core::Bindings) model into the two C
//! artifacts an OpenXR runtime compiles:
//!
//! - **Source** (`*generated_bindings.c`): one `switch (length)` verify
//!   function per profile, the `profile_templates[]` table, and the four
//!   enumerator name conversion functions.
//! - **Header** (`*generated_bindings.h`): the template structs and every
//!   declaration the source defines.
//!
//! Rendering is a pure function of the model and the [`GeneratorConfig`].
//! Profiles and sub-paths keep document order and enumerator sets are
//! sorted, so unchanged input always renders to identical bytes.
//! [`write_outputs`] relies on that to leave up-to-date files untouched.
//!
//! ## Crate Policy
//!
//! - Depends only on `xrbind-core` internally. Documents reach this crate
//!   already validated.
//! - Emitters write into a `String` through `std::fmt::Write`; only
//!   [`output`] touches the filesystem.

pub mod c;
pub mod config;
pub mod error;
pub mod header;
pub mod output;
pub mod source;

// Re-export primary types for ergonomic imports.
pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use header::generate_header;
pub use output::{write_outputs, OutputKind, OutputReport, OutputStatus, WriteMode};
pub use source::generate_source;
