//! # Generator Configuration
//!
//! Every knob has a default matching what the runtime's build expects, so
//! the configuration file is optional and may set any subset of fields:
//!
//! ```yaml
//! header_include: b_generated_bindings.h
//! paths_per_binding_template: 8
//! spdx_license: BSL-1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use xrbind_core::{is_c_identifier, DEFAULT_EXTRA_INPUTS, INPUT_PREFIX, OUTPUT_PREFIX};

use crate::error::CodegenError;

/// The smallest template that still holds a `position` component
/// (`x`, `y`, the bare path) plus the NULL terminator.
pub const MIN_PATHS_PER_BINDING_TEMPLATE: usize = 4;

/// Settings shared by the source and header emitters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Header the generated source includes for its own declarations.
    pub header_include: String,
    /// Runtime header declaring the `xrt_input_name`, `xrt_output_name` and
    /// `xrt_device_name` enumerations.
    pub defines_include: String,
    /// Prefix of every verify function name.
    pub verify_prefix: String,
    /// Value of `PATHS_PER_BINDING_TEMPLATE`, including the NULL slot.
    pub paths_per_binding_template: usize,
    /// Input enumerators emitted in the name functions even though no
    /// profile binds them.
    pub extra_inputs: Vec<String>,
    /// Returned by `xrt_input_name_enum` for an unrecognised string.
    pub input_fallback: String,
    /// Returned by `xrt_output_name_enum` for an unrecognised string.
    pub output_fallback: String,
    /// Optional SPDX license identifier for the generated file banner.
    pub spdx_license: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header_include: "b_generated_bindings.h".to_string(),
            defines_include: "xrt/xrt_defines.h".to_string(),
            verify_prefix: "oxr_verify_".to_string(),
            paths_per_binding_template: 8,
            extra_inputs: DEFAULT_EXTRA_INPUTS.iter().map(|s| s.to_string()).collect(),
            input_fallback: "XRT_INPUT_GENERIC_TRACKER_POSE".to_string(),
            output_fallback: "XRT_OUTPUT_NAME_SIMPLE_VIBRATION".to_string(),
            spdx_license: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse a YAML configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::ConfigParse`] on malformed YAML or unknown
    /// fields, or [`CodegenError::InvalidConfig`] if a value fails
    /// [`GeneratorConfig::validate`].
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, CodegenError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|source| CodegenError::ConfigParse {
                path: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] if the file cannot be read, otherwise as
    /// [`GeneratorConfig::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> Result<Self, CodegenError> {
        let text = std::fs::read_to_string(path).map_err(|source| CodegenError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&text, &path.display().to_string())?;
        tracing::debug!(config = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Check that every value can be pasted into C.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CodegenError> {
        let invalid = |msg: String| Err(CodegenError::InvalidConfig(msg));

        for (field, value) in [
            ("header_include", &self.header_include),
            ("defines_include", &self.defines_include),
        ] {
            if value.is_empty() || value.contains(['"', '\n', '\r']) {
                return invalid(format!("{field} '{value}' is not a valid include path"));
            }
        }
        if !is_c_identifier(&self.verify_prefix) {
            return invalid(format!(
                "verify_prefix '{}' is not a C identifier",
                self.verify_prefix
            ));
        }
        if self.paths_per_binding_template < MIN_PATHS_PER_BINDING_TEMPLATE {
            return invalid(format!(
                "paths_per_binding_template must be at least {MIN_PATHS_PER_BINDING_TEMPLATE}, got {}",
                self.paths_per_binding_template
            ));
        }
        for name in self.extra_inputs.iter().chain([&self.input_fallback]) {
            if !is_c_identifier(name) || !name.starts_with(INPUT_PREFIX) {
                return invalid(format!("'{name}' is not an {INPUT_PREFIX}* enumerator"));
            }
        }
        if !is_c_identifier(&self.output_fallback) || !self.output_fallback.starts_with(OUTPUT_PREFIX)
        {
            return invalid(format!(
                "'{}' is not an {OUTPUT_PREFIX}* enumerator",
                self.output_fallback
            ));
        }
        if let Some(spdx) = &self.spdx_license {
            if spdx.is_empty() || spdx.contains(['\n', '\r']) {
                return invalid("spdx_license must be a single non-empty line".to_string());
            }
        }
        Ok(())
    }
}
