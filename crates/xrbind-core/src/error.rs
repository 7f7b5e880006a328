//! # Error Types
//!
//! Errors raised while turning a parsed document into the typed
//! [`Bindings`](crate::Bindings) model. Each variant names the profile or
//! sub-path at fault so a build log points straight at the offending entry.

use thiserror::Error;

/// Error while building the bindings model from a document.
#[derive(Error, Debug)]
pub enum BindingsError {
    /// The document root is not an object carrying a `profiles` object.
    #[error("document must be an object with a `profiles` object")]
    MissingProfiles,

    /// An interaction profile name failed validation.
    #[error("invalid interaction profile name '{name}': {reason}")]
    InvalidProfileName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A profile entry could not be deserialized.
    #[error("profile '{profile}': {reason}")]
    InvalidProfile {
        /// Interaction profile path.
        profile: String,
        /// Underlying deserialization message.
        reason: String,
    },

    /// A sub-path entry could not be deserialized.
    #[error("profile '{profile}', sub-path '{subpath}': {reason}")]
    InvalidSubPath {
        /// Interaction profile path.
        profile: String,
        /// Sub-path key, e.g. `/input/trigger`.
        subpath: String,
        /// Underlying deserialization message.
        reason: String,
    },

    /// JSON text could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
