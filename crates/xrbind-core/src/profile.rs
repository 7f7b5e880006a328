//! # Interaction Profile Model
//!
//! Typed view of a bindings document. A document holds an ordered set of
//! [`Profile`]s keyed by interaction profile path; each profile declares
//! ordered [`SubPath`]s (`/input/trigger`, `/output/haptic`, ...) that are
//! instantiated under every subaction path into [`Component`]s.
//!
//! ## Expansion
//!
//! For each subaction path, for each sub-path, one component is produced
//! per entry of the sub-path's `components` list. A sub-path carrying a
//! `side` (the A/B and X/Y buttons of split controllers) only expands under
//! subaction paths containing that side.
//!
//! ## Canonical paths
//!
//! A component with base `<subaction><subpath>` maps to:
//!
//! - `position` → `base/x`, `base/y`, `base`
//! - anything else → `base/<component>`, `base`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BindingsError;

/// Prefix shared by every interaction profile path.
pub const INTERACTION_PROFILE_PREFIX: &str = "/interaction_profiles/";

/// Components whose name is appended to the SteamVR input path.
const STEAMVR_SUFFIXED_COMPONENTS: &[&str] = &["click", "touch", "force", "value"];

/// The only component name that denotes an output.
const OUTPUT_COMPONENT: &str = "haptic";

/// Sub-path `type` whose bindings belong to the output enumeration.
const OUTPUT_SUBPATH_KIND: &str = "vibration";

/// Validated interaction profile path, e.g.
/// `/interaction_profiles/valve/index_controller`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileName(String);

impl ProfileName {
    /// Parse and validate an interaction profile path.
    ///
    /// The path must start with [`INTERACTION_PROFILE_PREFIX`] and carry at
    /// least a vendor and a device segment. Every segment must be usable as
    /// part of a C identifier, because the verify function name is built
    /// from them.
    ///
    /// # Errors
    ///
    /// Returns [`BindingsError::InvalidProfileName`] if the path does not
    /// have that shape.
    pub fn parse(name: &str) -> Result<Self, BindingsError> {
        let invalid = |reason: String| BindingsError::InvalidProfileName {
            name: name.to_string(),
            reason,
        };

        let rest = name
            .strip_prefix(INTERACTION_PROFILE_PREFIX)
            .ok_or_else(|| invalid(format!("must start with '{INTERACTION_PROFILE_PREFIX}'")))?;

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() < 2 {
            return Err(invalid(
                "expected /interaction_profiles/<vendor>/<device>".to_string(),
            ));
        }
        if let Some(bad) = segments.iter().find(|s| !is_identifier_fragment(s)) {
            return Err(invalid(format!(
                "segment '{bad}' may only contain ASCII letters, digits and '_'"
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// The full interaction profile path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier fragment used to name the profile's verify function:
    /// the path after the prefix with `/` replaced by `_`.
    pub fn verify_stem(&self) -> String {
        self.0
            .strip_prefix(INTERACTION_PROFILE_PREFIX)
            .unwrap_or(&self.0)
            .replace('/', "_")
    }

    /// Vendor segment (second to last).
    pub fn vendor(&self) -> &str {
        self.0.rsplit('/').nth(1).unwrap_or_default()
    }

    /// Device segment (last).
    pub fn device(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// SteamVR input profile file name: `<vendor>_<device>_profile.json`.
    pub fn steamvr_input_profile_path(&self) -> String {
        format!("{}_{}_profile.json", self.vendor(), self.device())
    }

    /// SteamVR controller type: `monado_<vendor>_<device>`.
    pub fn steamvr_controller_type(&self) -> String {
        format!("monado_{}_{}", self.vendor(), self.device())
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_identifier_fragment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a component feeds the runtime (input) or is driven by it (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Buttons, axes, poses.
    Input,
    /// Haptics.
    Output,
}

impl Direction {
    /// Direction of a component by name: `haptic` is driven by the runtime,
    /// everything else feeds it.
    pub fn of_component(component: &str) -> Self {
        if component == OUTPUT_COMPONENT {
            Direction::Output
        } else {
            Direction::Input
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}

/// How a component resolves against its sub-path's `monado_bindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRef<'a> {
    /// The component has no entry in `monado_bindings`.
    Undeclared,
    /// The entry exists but is `null`: the runtime has no identifier for it.
    Unbound,
    /// The entry names a runtime identifier.
    Bound(&'a str),
}

impl<'a> BindingRef<'a> {
    /// The bound identifier, if any.
    pub fn name(self) -> Option<&'a str> {
        match self {
            BindingRef::Bound(name) => Some(name),
            BindingRef::Undeclared | BindingRef::Unbound => None,
        }
    }
}

/// One declared input/output surface of a profile, before expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPath {
    /// Sub-path key, e.g. `/input/thumbstick`. Filled from the map key.
    #[serde(skip)]
    pub path: String,
    /// Surface type tag (`button`, `trigger`, `joystick`, `pose`, `vibration`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable name.
    pub localized_name: String,
    /// Restricts the sub-path to subaction paths containing this string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Component names, in declaration order.
    pub components: Vec<String>,
    /// Component name → runtime identifier (or `null`).
    pub monado_bindings: BTreeMap<String, Option<String>>,
}

impl SubPath {
    /// Whether this sub-path exists under `subaction_path`.
    pub fn applies_to(&self, subaction_path: &str) -> bool {
        self.side
            .as_deref()
            .map_or(true, |side| subaction_path.contains(side))
    }

    /// Whether the bindings of this sub-path name output identifiers.
    pub fn is_output_kind(&self) -> bool {
        self.kind == OUTPUT_SUBPATH_KIND
    }

    /// Resolve a component name against `monado_bindings`.
    pub fn binding(&self, component: &str) -> BindingRef<'_> {
        match self.monado_bindings.get(component) {
            None => BindingRef::Undeclared,
            Some(None) => BindingRef::Unbound,
            Some(Some(name)) => BindingRef::Bound(name),
        }
    }
}

/// One concrete component: a sub-path component instantiated under a
/// subaction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component<'a> {
    /// The subaction path, e.g. `/user/hand/left`.
    pub subaction_path: &'a str,
    /// The declaring sub-path.
    pub subpath: &'a SubPath,
    /// The component name, e.g. `click`.
    pub name: &'a str,
}

impl<'a> Component<'a> {
    /// `<subaction><subpath>`, e.g. `/user/hand/left/input/trigger`.
    pub fn base_path(&self) -> String {
        format!("{}{}", self.subaction_path, self.subpath.path)
    }

    /// Every canonical path that selects this component. Never empty.
    pub fn paths(&self) -> Vec<String> {
        let base = self.base_path();
        if self.name == "position" {
            vec![format!("{base}/x"), format!("{base}/y"), base]
        } else {
            vec![format!("{base}/{}", self.name), base]
        }
    }

    /// SteamVR input path: the sub-path, suffixed with the component for
    /// `click`, `touch`, `force` and `value`.
    pub fn steamvr_path(&self) -> String {
        if STEAMVR_SUFFIXED_COMPONENTS.contains(&self.name) {
            format!("{}/{}", self.subpath.path, self.name)
        } else {
            self.subpath.path.clone()
        }
    }

    /// Input for everything except haptics.
    pub fn direction(&self) -> Direction {
        Direction::of_component(self.name)
    }

    /// The component's runtime binding.
    pub fn binding(&self) -> BindingRef<'a> {
        self.subpath.binding(self.name)
    }

    /// Localized name of the declaring sub-path.
    pub fn localized_name(&self) -> &'a str {
        &self.subpath.localized_name
    }
}

/// One controller's full description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Interaction profile path.
    pub name: ProfileName,
    /// Display title.
    pub title: String,
    /// Device-type tag (`type` in the document).
    pub device_type: String,
    /// Runtime device enumerator, e.g. `XRT_DEVICE_INDEX_CONTROLLER`.
    pub monado_device: String,
    /// Top-level user paths the sub-paths are instantiated under.
    pub subaction_paths: Vec<String>,
    /// Declared sub-paths, in document order.
    pub subpaths: Vec<SubPath>,
}

#[derive(Deserialize)]
struct RawProfile {
    title: String,
    #[serde(rename = "type")]
    device_type: String,
    monado_device: String,
    subaction_paths: Vec<String>,
    subpaths: serde_json::Map<String, Value>,
}

impl Profile {
    /// Build a profile from its name and document entry.
    ///
    /// # Errors
    ///
    /// Returns an error naming the profile (and sub-path, where relevant)
    /// if the name is invalid or a required key is missing or mistyped.
    pub fn from_value(name: &str, value: &Value) -> Result<Self, BindingsError> {
        let profile_name = ProfileName::parse(name)?;

        let raw = RawProfile::deserialize(value).map_err(|e| BindingsError::InvalidProfile {
            profile: name.to_string(),
            reason: e.to_string(),
        })?;

        let subpaths = raw
            .subpaths
            .iter()
            .map(|(key, entry)| {
                let mut subpath =
                    SubPath::deserialize(entry).map_err(|e| BindingsError::InvalidSubPath {
                        profile: name.to_string(),
                        subpath: key.clone(),
                        reason: e.to_string(),
                    })?;
                subpath.path = key.clone();
                Ok(subpath)
            })
            .collect::<Result<Vec<_>, BindingsError>>()?;

        Ok(Self {
            name: profile_name,
            title: raw.title,
            device_type: raw.device_type,
            monado_device: raw.monado_device,
            subaction_paths: raw.subaction_paths,
            subpaths,
        })
    }

    /// Expand the profile into its concrete components.
    ///
    /// Ordering is subaction path major, then sub-path, then component, all
    /// in document order.
    pub fn components(&self) -> Vec<Component<'_>> {
        let mut components = Vec::new();
        for subaction_path in &self.subaction_paths {
            for subpath in self.subpaths.iter().filter(|s| s.applies_to(subaction_path)) {
                for name in &subpath.components {
                    components.push(Component {
                        subaction_path,
                        subpath,
                        name,
                    });
                }
            }
        }
        components
    }

    /// Look up a sub-path by key.
    pub fn subpath(&self, path: &str) -> Option<&SubPath> {
        self.subpaths.iter().find(|s| s.path == path)
    }
}

/// A parsed bindings document: every interaction profile, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    profiles: Vec<Profile>,
}

impl Bindings {
    /// Build from an order-preserving JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`BindingsError::MissingProfiles`] if the root has no
    /// `profiles` object, or the first profile-level error encountered.
    pub fn from_value(value: &Value) -> Result<Self, BindingsError> {
        let profiles = value
            .get("profiles")
            .and_then(Value::as_object)
            .ok_or(BindingsError::MissingProfiles)?;

        let profiles = profiles
            .iter()
            .map(|(name, entry)| Profile::from_value(name, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { profiles })
    }

    /// Parse JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BindingsError::Json`] for malformed JSON, otherwise as
    /// [`Bindings::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, BindingsError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// All profiles, in document order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the document declares no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile by interaction profile path.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name.as_str() == name)
    }
}
