//! # Header Emitter
//!
//! Renders `*generated_bindings.h`: verify function prototypes, the
//! `binding_template` and `profile_template` structs, the
//! `profile_templates` declaration and the name function prototypes.

use std::fmt::Write;

use xrbind_core::Bindings;

use crate::c::Banner;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;

/// Render the generated header file.
///
/// # Errors
///
/// Returns [`CodegenError::NoProfiles`] for an empty document or
/// [`CodegenError::InvalidConfig`] for a bad configuration.
pub fn generate_header(
    bindings: &Bindings,
    config: &GeneratorConfig,
) -> Result<String, CodegenError> {
    config.validate()?;
    if bindings.is_empty() {
        return Err(CodegenError::NoProfiles);
    }

    let mut out = String::new();
    write!(
        out,
        "{}",
        Banner {
            brief: "Generated bindings data header",
            group: "oxr_api",
            spdx_license: config.spdx_license.as_deref(),
        }
    )?;
    write!(
        out,
        "\n#pragma once\n\n#include <stddef.h>\n\n#include \"{}\"\n\n// clang-format off\n",
        config.defines_include
    )?;

    for profile in bindings.profiles() {
        write!(
            out,
            "\nbool\n{}{}_subpath(const char *str, size_t length);\n",
            config.verify_prefix,
            profile.name.verify_stem()
        )?;
    }

    write!(
        out,
        "
#define PATHS_PER_BINDING_TEMPLATE {paths}

struct binding_template
{{
\tconst char *subaction_path;
\tconst char *steamvr_path;
\tconst char *localized_name;
\tconst char *paths[PATHS_PER_BINDING_TEMPLATE];
\tenum xrt_input_name input;
\tenum xrt_output_name output;
}};

struct profile_template
{{
\tenum xrt_device_name name;
\tconst char *path;
\tconst char *localized_name;
\tconst char *steamvr_input_profile_path;
\tconst char *steamvr_controller_type;
\tstruct binding_template *bindings;
\tsize_t binding_count;
}};

#define NUM_PROFILE_TEMPLATES {count}
extern struct profile_template profile_templates[NUM_PROFILE_TEMPLATES];

",
        paths = config.paths_per_binding_template,
        count = bindings.len(),
    )?;

    out.push_str("const char *\nxrt_input_name_string(enum xrt_input_name input);\n\n");
    out.push_str("enum xrt_input_name\nxrt_input_name_enum(const char *input);\n\n");
    out.push_str("const char *\nxrt_output_name_string(enum xrt_output_name output);\n\n");
    out.push_str("enum xrt_output_name\nxrt_output_name_enum(const char *output);\n\n");
    out.push_str("\n// clang-format on\n");

    tracing::debug!(profiles = bindings.len(), bytes = out.len(), "rendered bindings header");
    Ok(out)
}
