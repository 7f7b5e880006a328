//! # xrbind-core — Foundational Types for Interaction Profile Bindings
//!
//! This crate defines the in-memory model of a bindings document: the
//! interaction profiles a runtime supports, the sub-paths each profile
//! declares, and the concrete components those sub-paths expand into once
//! they are instantiated under a subaction path (`/user/hand/left`, ...).
//!
//! ## Key Design Principles
//!
//! 1. **Order is data.** Profiles and sub-paths keep document order. Every
//!    generated artifact is derived from that order, so regenerating from an
//!    unchanged document yields byte-identical output.
//!
//! 2. **Validated profile names.** [`ProfileName`] only accepts
//!    `/interaction_profiles/<vendor>/<device>` paths whose segments are
//!    usable inside a C identifier. Derived names (verify stem, SteamVR
//!    controller type) never need re-checking downstream.
//!
//! 3. **Borrowed components.** [`Component`] borrows from its [`Profile`];
//!    expansion allocates only the component list.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `xrbind-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod names;
pub mod paths;
pub mod profile;

// Re-export primary types for ergonomic imports.
pub use error::BindingsError;
pub use names::{direction_of, BindingNames, DEFAULT_EXTRA_INPUTS, INPUT_PREFIX, OUTPUT_PREFIX};
pub use paths::PathBuckets;
pub use profile::{
    BindingRef, Bindings, Component, Direction, Profile, ProfileName, SubPath,
    INTERACTION_PROFILE_PREFIX,
};

/// Returns `true` if `s` is a non-empty C identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
