//! # Source Emitter
//!
//! Renders `*generated_bindings.c`:
//!
//! 1. One verify function per profile. It switches on the byte length of
//!    the candidate path and compares only against paths of that length,
//!    in the order [`PathBuckets`] collected them.
//! 2. `profile_templates[]`: one entry per profile with a nested
//!    `binding_template[]` holding every expanded component.
//! 3. `xrt_input_name_string` / `xrt_input_name_enum` and their output
//!    counterparts, over the sorted [`BindingNames`] sets.

use std::fmt::Write;

use xrbind_core::{BindingNames, BindingRef, Bindings, Component, Direction, PathBuckets, Profile};

use crate::c::{escape_c_string, Banner};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;

/// Render the generated source file.
///
/// # Errors
///
/// Returns [`CodegenError::NoProfiles`] for an empty document,
/// [`CodegenError::NoBindings`] for a profile without components,
/// [`CodegenError::TooManyPaths`] if a component does not fit a binding
/// template, or [`CodegenError::InvalidConfig`] for a bad configuration.
pub fn generate_source(
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
            brief: "Generated bindings data",
            group: "oxr_main",
            spdx_license: config.spdx_license.as_deref(),
        }
    )?;
    write!(
        out,
        "\n#include \"{}\"\n#include <string.h>\n\n// clang-format off\n",
        config.header_include
    )?;

    for profile in bindings.profiles() {
        write_verify_function(&mut out, profile, config)?;
    }

    write_profile_templates(&mut out, bindings, config)?;

    let names = BindingNames::collect(bindings, &config.extra_inputs);
    write_name_functions(&mut out, &names, config)?;

    out.push_str("\n// clang-format on\n");

    tracing::debug!(
        profiles = bindings.len(),
        inputs = names.input_count(),
        outputs = names.output_count(),
        bytes = out.len(),
        "rendered bindings source"
    );
    Ok(out)
}

fn write_verify_function(
    out: &mut String,
    profile: &Profile,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    write!(
        out,
        "\nbool\n{}{}_subpath(const char *str, size_t length)\n{{\n\tswitch (length) {{\n",
        config.verify_prefix,
        profile.name.verify_stem()
    )?;

    for (length, paths) in PathBuckets::from_profile(profile).iter() {
        write!(out, "\tcase {length}:\n\t\t")?;
        for path in paths {
            write!(
                out,
                "if (strcmp(str, \"{}\") == 0) {{\n\t\t\treturn true;\n\t\t}} else ",
                escape_c_string(path)
            )?;
        }
        out.push_str("{\n\t\t\treturn false;\n\t\t}\n");
    }

    out.push_str("\tdefault:\n\t\treturn false;\n\t}\n}\n");
    Ok(())
}

fn write_profile_templates(
    out: &mut String,
    bindings: &Bindings,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    writeln!(
        out,
        "\n\nstruct profile_template profile_templates[{}] = {{ // array of profile_template",
        bindings.len()
    )?;

    for profile in bindings.profiles() {
        let components = profile.components();
        if components.is_empty() {
            return Err(CodegenError::NoBindings {
                profile: profile.name.to_string(),
            });
        }

        out.push_str("\t{ // profile_template\n");
        writeln!(out, "\t\t.name = {},", profile.monado_device)?;
        writeln!(out, "\t\t.path = \"{}\",", escape_c_string(profile.name.as_str()))?;
        writeln!(out, "\t\t.localized_name = \"{}\",", escape_c_string(&profile.title))?;
        writeln!(
            out,
            "\t\t.steamvr_input_profile_path = \"{}\",",
            profile.name.steamvr_input_profile_path()
        )?;
        writeln!(
            out,
            "\t\t.steamvr_controller_type = \"{}\",",
            profile.name.steamvr_controller_type()
        )?;
        writeln!(out, "\t\t.binding_count = {},", components.len())?;
        out.push_str("\t\t.bindings = (struct binding_template[]){ // array of binding_template\n");

        for (index, component) in components.iter().enumerate() {
            write_binding_template(out, profile, index, component, config)?;
        }

        out.push_str("\t\t}, // /array of binding_template\n");
        out.push_str("\t}, // /profile_template\n");
    }

    out.push_str("}; // /array of profile_template\n\n");
    Ok(())
}

fn write_binding_template(
    out: &mut String,
    profile: &Profile,
    index: usize,
    component: &Component<'_>,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    let paths = component.paths();
    // The last slot holds the NULL terminator.
    if paths.len() >= config.paths_per_binding_template {
        return Err(CodegenError::TooManyPaths {
            profile: profile.name.to_string(),
            index,
            subaction_path: component.subaction_path.to_string(),
            subpath: component.subpath.path.clone(),
            count: paths.len(),
            capacity: config.paths_per_binding_template,
        });
    }

    writeln!(out, "\t\t\t{{ // binding_template {index}")?;
    writeln!(
        out,
        "\t\t\t\t.subaction_path = \"{}\",",
        escape_c_string(component.subaction_path)
    )?;
    writeln!(
        out,
        "\t\t\t\t.steamvr_path = \"{}\",",
        escape_c_string(&component.steamvr_path())
    )?;
    writeln!(
        out,
        "\t\t\t\t.localized_name = \"{}\",",
        escape_c_string(component.localized_name())
    )?;

    out.push_str("\t\t\t\t.paths = { // array of paths\n");
    for path in &paths {
        writeln!(out, "\t\t\t\t\t\"{}\",", escape_c_string(path))?;
    }
    out.push_str("\t\t\t\t\tNULL\n");
    out.push_str("\t\t\t\t}, // /array of paths\n");

    // Components without a `monado_bindings` entry leave both fields to the
    // zero initializer.
    let binding = component.binding();
    if binding != BindingRef::Undeclared {
        let (input, output) = match (binding.name(), component.direction()) {
            (Some(name), Direction::Input) => (name, "0"),
            (Some(name), Direction::Output) => ("0", name),
            (None, _) => ("0", "0"),
        };
        writeln!(out, "\t\t\t\t.input = {input},")?;
        writeln!(out, "\t\t\t\t.output = {output},")?;
    }

    writeln!(out, "\t\t\t}}, // /binding_template {index}")?;
    Ok(())
}

fn write_name_functions(
    out: &mut String,
    names: &BindingNames,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    out.push_str("const char *\nxrt_input_name_string(enum xrt_input_name input)\n{\n");
    out.push_str("\tswitch(input)\n\t{\n");
    for name in names.inputs() {
        writeln!(out, "\tcase {name}: return \"{name}\";")?;
    }
    out.push_str("\tdefault: return \"UNKNOWN\";\n\t}\n}\n");

    out.push_str("enum xrt_input_name\nxrt_input_name_enum(const char *input)\n{\n");
    for name in names.inputs() {
        writeln!(out, "\tif(strcmp(\"{name}\", input) == 0) return {name};")?;
    }
    writeln!(out, "\treturn {};", config.input_fallback)?;
    out.push_str("}\n");

    out.push_str("const char *\nxrt_output_name_string(enum xrt_output_name output)\n{\n");
    out.push_str("\tswitch(output)\n\t{\n");
    for name in names.outputs() {
        writeln!(out, "\tcase {name}: return \"{name}\";")?;
    }
    out.push_str("\tdefault: return \"UNKNOWN\";\n\t}\n}\n");

    out.push_str("enum xrt_output_name\nxrt_output_name_enum(const char *output)\n{\n");
    for name in names.outputs() {
        writeln!(out, "\tif(strcmp(\"{name}\", output) == 0) return {name};")?;
    }
    writeln!(out, "\treturn {};", config.output_fallback)?;
    out.push_str("}\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn select_only() -> Bindings {
        Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/simple_controller": {
                    "title": "Khronos Simple Controller",
                    "type": "khr_simple_controller",
                    "monado_device": "XRT_DEVICE_SIMPLE_CONTROLLER",
                    "subaction_paths": ["/user/hand/left"],
                    "subpaths": {
                        "/input/select": {
                            "type": "button",
                            "localized_name": "Select",
                            "components": ["click"],
                            "monado_bindings": { "click": "XRT_INPUT_SIMPLE_SELECT_CLICK" }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn with_haptic(binding: serde_json::Value) -> Bindings {
        Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/simple_controller": {
                    "title": "Khronos Simple Controller",
                    "type": "khr_simple_controller",
                    "monado_device": "XRT_DEVICE_SIMPLE_CONTROLLER",
                    "subaction_paths": ["/user/hand/left"],
                    "subpaths": {
                        "/output/haptic": {
                            "type": "vibration",
                            "localized_name": "Haptic",
                            "components": ["haptic"],
                            "monado_bindings": { "haptic": binding }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn verify_function_layout() {
        let source = generate_source(&select_only(), &GeneratorConfig::default()).unwrap();
        let expected = "\nbool\n\
oxr_verify_khr_simple_controller_subpath(const char *str, size_t length)\n\
{\n\
\tswitch (length) {\n\
\tcase 28:\n\
\t\tif (strcmp(str, \"/user/hand/left/input/select\") == 0) {\n\
\t\t\treturn true;\n\
\t\t} else {\n\
\t\t\treturn false;\n\
\t\t}\n\
\tcase 34:\n\
\t\tif (strcmp(str, \"/user/hand/left/input/select/click\") == 0) {\n\
\t\t\treturn true;\n\
\t\t} else {\n\
\t\t\treturn false;\n\
\t\t}\n\
\tdefault:\n\
\t\treturn false;\n\
\t}\n\
}\n";
        assert!(source.contains(expected), "{source}");
    }

    #[test]
    fn binding_template_layout() {
        let source = generate_source(&select_only(), &GeneratorConfig::default()).unwrap();
        let expected = "\t\t\t{ // binding_template 0\n\
\t\t\t\t.subaction_path = \"/user/hand/left\",\n\
\t\t\t\t.steamvr_path = \"/input/select/click\",\n\
\t\t\t\t.localized_name = \"Select\",\n\
\t\t\t\t.paths = { // array of paths\n\
\t\t\t\t\t\"/user/hand/left/input/select/click\",\n\
\t\t\t\t\t\"/user/hand/left/input/select\",\n\
\t\t\t\t\tNULL\n\
\t\t\t\t}, // /array of paths\n\
\t\t\t\t.input = XRT_INPUT_SIMPLE_SELECT_CLICK,\n\
\t\t\t\t.output = 0,\n\
\t\t\t}, // /binding_template 0\n";
        assert!(source.contains(expected), "{source}");
    }

    #[test]
    fn profile_template_fields() {
        let source = generate_source(&select_only(), &GeneratorConfig::default()).unwrap();
        for line in [
            "struct profile_template profile_templates[1] = { // array of profile_template\n",
            "\t\t.name = XRT_DEVICE_SIMPLE_CONTROLLER,\n",
            "\t\t.path = \"/interaction_profiles/khr/simple_controller\",\n",
            "\t\t.localized_name = \"Khronos Simple Controller\",\n",
            "\t\t.steamvr_input_profile_path = \"khr_simple_controller_profile.json\",\n",
            "\t\t.steamvr_controller_type = \"monado_khr_simple_controller\",\n",
            "\t\t.binding_count = 1,\n",
            "}; // /array of profile_template\n",
        ] {
            assert!(source.contains(line), "missing {line:?}");
        }
    }

    #[test]
    fn source_framing() {
        let source = generate_source(&select_only(), &GeneratorConfig::default()).unwrap();
        assert!(source.starts_with("/*!\n"));
        assert!(source.contains("#include \"b_generated_bindings.h\"\n#include <string.h>\n"));
        assert!(source.ends_with("\n// clang-format on\n"));
    }

    #[test]
    fn haptic_binds_output_only() {
        let source = generate_source(
            &with_haptic(json!("XRT_OUTPUT_NAME_SIMPLE_VIBRATION")),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert!(source.contains("\t\t\t\t.input = 0,\n\t\t\t\t.output = XRT_OUTPUT_NAME_SIMPLE_VIBRATION,\n"));
        assert!(source.contains("\t\t\t\t.steamvr_path = \"/output/haptic\",\n"));
        assert!(source.contains(
            "\tcase XRT_OUTPUT_NAME_SIMPLE_VIBRATION: return \"XRT_OUTPUT_NAME_SIMPLE_VIBRATION\";\n"
        ));
    }

    #[test]
    fn null_binding_zeroes_both_fields_and_is_not_named() {
        let source = generate_source(&with_haptic(json!(null)), &GeneratorConfig::default()).unwrap();
        assert!(source.contains("\t\t\t\t.input = 0,\n\t\t\t\t.output = 0,\n"));
        assert!(source.contains(
            "xrt_output_name_string(enum xrt_output_name output)\n{\n\tswitch(output)\n\t{\n\tdefault: return \"UNKNOWN\";\n"
        ));
    }

    #[test]
    fn undeclared_binding_omits_fields() {
        let bindings = Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/simple_controller": {
                    "title": "Khronos Simple Controller",
                    "type": "khr_simple_controller",
                    "monado_device": "XRT_DEVICE_SIMPLE_CONTROLLER",
                    "subaction_paths": ["/user/hand/left"],
                    "subpaths": {
                        "/input/select": {
                            "type": "button",
                            "localized_name": "Select",
                            "components": ["click"],
                            "monado_bindings": {}
                        }
                    }
                }
            }
        }))
        .unwrap();
        let source = generate_source(&bindings, &GeneratorConfig::default()).unwrap();
        assert!(!source.contains(".input ="));
        assert!(!source.contains(".output ="));
    }

    #[test]
    fn name_functions_are_sorted_and_include_extras() {
        let source = generate_source(&select_only(), &GeneratorConfig::default()).unwrap();
        let head = source.find("\tcase XRT_INPUT_GENERIC_HEAD_POSE:").unwrap();
        let select = source.find("\tcase XRT_INPUT_SIMPLE_SELECT_CLICK:").unwrap();
        let tracker = source.find("\tcase XRT_INPUT_GENERIC_TRACKER_POSE:").unwrap();
        assert!(head < tracker && tracker < select);
        assert!(source.contains(
            "\tif(strcmp(\"XRT_INPUT_SIMPLE_SELECT_CLICK\", input) == 0) return XRT_INPUT_SIMPLE_SELECT_CLICK;\n"
        ));
        assert!(source.contains("\treturn XRT_INPUT_GENERIC_TRACKER_POSE;\n}\n"));
        assert!(source.contains("\treturn XRT_OUTPUT_NAME_SIMPLE_VIBRATION;\n}\n"));
    }

    #[test]
    fn config_changes_prefix_include_and_fallbacks() {
        let config = GeneratorConfig {
            header_include: "my_bindings.h".to_string(),
            verify_prefix: "rt_verify_".to_string(),
            input_fallback: "XRT_INPUT_GENERIC_HEAD_POSE".to_string(),
            spdx_license: Some("BSL-1.0".to_string()),
            ..GeneratorConfig::default()
        };
        let source = generate_source(&select_only(), &config).unwrap();
        assert!(source.starts_with("// SPDX-License-Identifier: BSL-1.0\n"));
        assert!(source.contains("#include \"my_bindings.h\"\n"));
        assert!(source.contains("\nrt_verify_khr_simple_controller_subpath("));
        assert!(source.contains("\treturn XRT_INPUT_GENERIC_HEAD_POSE;\n}\n"));
    }

    #[test]
    fn strings_are_escaped() {
        let bindings = Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/acme/wand": {
                    "title": "ACME \"Wand\"",
                    "type": "acme_wand",
                    "monado_device": "XRT_DEVICE_ACME_WAND",
                    "subaction_paths": ["/user/hand/left"],
                    "subpaths": {
                        "/input/select": {
                            "type": "button",
                            "localized_name": "Select \\ Go",
                            "components": ["click"],
                            "monado_bindings": { "click": "XRT_INPUT_ACME_SELECT_CLICK" }
                        }
                    }
                }
            }
        }))
        .unwrap();
        let source = generate_source(&bindings, &GeneratorConfig::default()).unwrap();
        assert!(source.contains("\t\t.localized_name = \"ACME \\\"Wand\\\"\",\n"));
        assert!(source.contains("\t\t\t\t.localized_name = \"Select \\\\ Go\",\n"));
    }

    #[test]
    fn position_fills_three_path_slots() {
        let bindings = Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/acme/pad": {
                    "title": "ACME Pad",
                    "type": "acme_pad",
                    "monado_device": "XRT_DEVICE_ACME_PAD",
                    "subaction_paths": ["/user/gamepad"],
                    "subpaths": {
                        "/input/thumbstick": {
                            "type": "joystick",
                            "localized_name": "Thumbstick",
                            "components": ["position"],
                            "monado_bindings": { "position": "XRT_INPUT_ACME_THUMBSTICK" }
                        }
                    }
                }
            }
        }))
        .unwrap();
        let source = generate_source(&bindings, &GeneratorConfig::default()).unwrap();
        assert!(source.contains(
            "\t\t\t\t\t\"/user/gamepad/input/thumbstick/x\",\n\
\t\t\t\t\t\"/user/gamepad/input/thumbstick/y\",\n\
\t\t\t\t\t\"/user/gamepad/input/thumbstick\",\n\
\t\t\t\t\tNULL\n"
        ));
        assert!(source.contains("\t\t\t\t.steamvr_path = \"/input/thumbstick\",\n"));
        // x and y share a length bucket, in collection order.
        assert!(source.contains(
            "\tcase 32:\n\t\tif (strcmp(str, \"/user/gamepad/input/thumbstick/x\") == 0) {\n\t\t\treturn true;\n\t\t} else if (strcmp(str, \"/user/gamepad/input/thumbstick/y\") == 0) {\n"
        ));
    }

    #[test]
    fn empty_document_is_rejected() {
        let bindings = Bindings::from_value(&json!({ "profiles": {} })).unwrap();
        let err = generate_source(&bindings, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, CodegenError::NoProfiles));
    }

    #[test]
    fn profile_without_components_is_rejected() {
        let bindings = Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/acme/wand": {
                    "title": "Acme Wand",
                    "type": "acme_wand",
                    "monado_device": "XRT_DEVICE_ACME_WAND",
                    "subaction_paths": [],
                    "subpaths": {}
                }
            }
        }))
        .unwrap();
        let err = generate_source(&bindings, &GeneratorConfig::default()).unwrap_err();
        assert!(
            matches!(err, CodegenError::NoBindings { ref profile } if profile == "/interaction_profiles/acme/wand")
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_rendering() {
        let config = GeneratorConfig {
            paths_per_binding_template: 2,
            ..GeneratorConfig::default()
        };
        let err = generate_source(&select_only(), &config).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidConfig(_)));
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = GeneratorConfig::default();
        let first = generate_source(&select_only(), &config).unwrap();
        let second = generate_source(&select_only(), &config).unwrap();
        assert_eq!(first, second);
    }
}
