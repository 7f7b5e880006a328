//! # Semantic Checks
//!
//! Rules a JSON schema cannot express. Errors block generation; warnings
//! are logged and generation proceeds.
//!
//! | Rule | Severity |
//! |---|---|
//! | device enumerator is not a C identifier | error |
//! | two profiles share a verify stem | error |
//! | binding is not a C identifier | error |
//! | binding prefix disagrees with the component's direction | error |
//! | component expands to more paths than a binding template holds | error |
//! | profile expands to no binding templates | error |
//! | `side` matches none of the profile's subaction paths | warning |
//! | component has no `monado_bindings` entry | warning |
//! | `monado_bindings` names a component the sub-path does not declare | warning |
//! | `haptic` component on a non-`vibration` sub-path | warning |

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use xrbind_core::{
    direction_of, is_c_identifier, BindingRef, Bindings, Direction, Profile, SubPath,
};

/// How serious a [`SemanticIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Generation proceeds; the issue is logged.
    Warning,
    /// Generation is refused.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One finding of [`check_semantics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticIssue {
    /// Severity.
    pub severity: Severity,
    /// Interaction profile path.
    pub profile: String,
    /// Sub-path key, when the issue is scoped to one.
    pub subpath: Option<String>,
    /// What is wrong.
    pub message: String,
}

impl SemanticIssue {
    fn profile(severity: Severity, profile: &Profile, message: String) -> Self {
        Self {
            severity,
            profile: profile.name.to_string(),
            subpath: None,
            message,
        }
    }

    fn subpath(severity: Severity, profile: &Profile, subpath: &SubPath, message: String) -> Self {
        Self {
            severity,
            profile: profile.name.to_string(),
            subpath: Some(subpath.path.clone()),
            message,
        }
    }

    /// Returns true for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for SemanticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subpath {
            Some(subpath) => write!(
                f,
                "{}: {} {}: {}",
                self.severity, self.profile, subpath, self.message
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.profile, self.message),
        }
    }
}

/// Returns true if any issue is an error.
pub fn has_errors(issues: &[SemanticIssue]) -> bool {
    issues.iter().any(SemanticIssue::is_error)
}

/// Run every semantic rule over `bindings`.
///
/// `paths_per_binding_template` is the capacity of the generated
/// `binding_template.paths` array, including its `NULL` terminator.
pub fn check_semantics(bindings: &Bindings, paths_per_binding_template: usize) -> Vec<SemanticIssue> {
    let mut issues = Vec::new();
    let mut stems: BTreeMap<String, &str> = BTreeMap::new();

    for profile in bindings.profiles() {
        if !is_c_identifier(&profile.monado_device) {
            issues.push(SemanticIssue::profile(
                Severity::Error,
                profile,
                format!(
                    "monado_device '{}' is not a C identifier",
                    profile.monado_device
                ),
            ));
        }

        let stem = profile.name.verify_stem();
        if let Some(first) = stems.get(&stem) {
            issues.push(SemanticIssue::profile(
                Severity::Error,
                profile,
                format!("verify function stem '{stem}' is already used by '{first}'"),
            ));
        } else {
            stems.insert(stem, profile.name.as_str());
        }

        // C has no empty initializer for the nested `bindings` array.
        if profile.components().is_empty() {
            let message = if profile.subaction_paths.is_empty() {
                "no subaction paths declared; the profile expands to no bindings"
            } else {
                "no sub-path applies to any subaction path; the profile expands to no bindings"
            };
            issues.push(SemanticIssue::profile(
                Severity::Error,
                profile,
                message.to_string(),
            ));
        }

        for subpath in &profile.subpaths {
            check_subpath(profile, subpath, &mut issues);
        }

        check_path_capacity(profile, paths_per_binding_template, &mut issues);
    }

    issues
}

fn check_subpath(profile: &Profile, subpath: &SubPath, issues: &mut Vec<SemanticIssue>) {
    if let Some(side) = subpath.side.as_deref() {
        if !profile.subaction_paths.iter().any(|p| subpath.applies_to(p)) {
            issues.push(SemanticIssue::subpath(
                Severity::Warning,
                profile,
                subpath,
                format!("side '{side}' matches no subaction path; the sub-path is never expanded"),
            ));
        }
    }

    for component in &subpath.components {
        let expected = Direction::of_component(component);
        if expected == Direction::Output && !subpath.is_output_kind() {
            issues.push(SemanticIssue::subpath(
                Severity::Warning,
                profile,
                subpath,
                format!(
                    "haptic component on sub-path of type '{}'; outputs are expected on 'vibration' sub-paths",
                    subpath.kind
                ),
            ));
        }

        match subpath.binding(component) {
            BindingRef::Undeclared => issues.push(SemanticIssue::subpath(
                Severity::Warning,
                profile,
                subpath,
                format!("component '{component}' has no monado_bindings entry"),
            )),
            BindingRef::Unbound => {}
            BindingRef::Bound(name) => {
                if !is_c_identifier(name) {
                    issues.push(SemanticIssue::subpath(
                        Severity::Error,
                        profile,
                        subpath,
                        format!("binding '{name}' for '{component}' is not a C identifier"),
                    ));
                    continue;
                }
                match direction_of(name) {
                    Some(actual) if actual == expected => {}
                    Some(actual) => issues.push(SemanticIssue::subpath(
                        Severity::Error,
                        profile,
                        subpath,
                        format!(
                            "binding '{name}' for '{component}' is an {actual} enumerator but the component is an {expected}"
                        ),
                    )),
                    None => issues.push(SemanticIssue::subpath(
                        Severity::Error,
                        profile,
                        subpath,
                        format!(
                            "binding '{name}' for '{component}' is neither an XRT_INPUT_ nor an XRT_OUTPUT_ enumerator"
                        ),
                    )),
                }
            }
        }
    }

    for bound in subpath.monado_bindings.keys() {
        if !subpath.components.contains(bound) {
            issues.push(SemanticIssue::subpath(
                Severity::Warning,
                profile,
                subpath,
                format!("monado_bindings entry '{bound}' does not match any declared component"),
            ));
        }
    }
}

fn check_path_capacity(profile: &Profile, capacity: usize, issues: &mut Vec<SemanticIssue>) {
    let mut reported: BTreeSet<(&str, &str)> = BTreeSet::new();
    for component in profile.components() {
        let count = component.paths().len();
        // One slot is reserved for the NULL terminator.
        if count >= capacity && reported.insert((component.subpath.path.as_str(), component.name)) {
            issues.push(SemanticIssue::subpath(
                Severity::Error,
                profile,
                component.subpath,
                format!(
                    "component '{}' expands to {count} paths; binding templates hold {} plus NULL",
                    component.name,
                    capacity.saturating_sub(1)
                ),
            ));
        }
    }
}
