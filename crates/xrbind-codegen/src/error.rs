//! # Error Types

use thiserror::Error;

/// Error while configuring, rendering, or writing generated code.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A configuration value cannot produce valid C.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("cannot parse generator config '{path}': {source}")]
    ConfigParse {
        /// Path to the configuration file.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The document declares no interaction profiles. C does not allow a
    /// zero-length `profile_templates` array.
    #[error("bindings document declares no interaction profiles")]
    NoProfiles,

    /// A profile expands to no binding templates. C does not allow an
    /// empty initializer for its `bindings` array.
    #[error("profile '{profile}' expands to no bindings")]
    NoBindings {
        /// Interaction profile path.
        profile: String,
    },

    /// A component has more canonical paths than a binding template holds.
    #[error(
        "profile '{profile}', binding {index} ({subaction_path}{subpath}): \
         {count} paths do not fit PATHS_PER_BINDING_TEMPLATE = {capacity} \
         (one slot is reserved for the NULL terminator)"
    )]
    TooManyPaths {
        /// Interaction profile path.
        profile: String,
        /// Index of the binding template within the profile.
        index: usize,
        /// Subaction path of the component.
        subaction_path: String,
        /// Sub-path of the component.
        subpath: String,
        /// Number of canonical paths.
        count: usize,
        /// Configured `PATHS_PER_BINDING_TEMPLATE`.
        capacity: usize,
    },

    /// Writing into the output buffer failed.
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Reading or writing a generated file failed.
    #[error("io error on '{path}': {source}")]
    Io {
        /// The file being read or written.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
