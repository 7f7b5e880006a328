//! # Runtime Binding Names
//!
//! Collects the runtime input and output enumerators referenced by a
//! bindings document. The sets drive the generated name↔enum conversion
//! functions, so they are kept sorted to make output order independent of
//! hashing or document shuffles.
//!
//! A binding belongs to the set of its component's direction, the same
//! rule that fills `.input`/`.output` in the binding table. `null` bindings are
//! skipped. A handful of runtime inputs are never referenced by any
//! profile but must still round-trip through the name functions; they are
//! passed in as `extra_inputs` (see [`DEFAULT_EXTRA_INPUTS`]).

use std::collections::BTreeSet;

use crate::profile::{Bindings, Direction};

/// Prefix of every runtime input enumerator.
pub const INPUT_PREFIX: &str = "XRT_INPUT_";

/// Prefix of every runtime output enumerator.
pub const OUTPUT_PREFIX: &str = "XRT_OUTPUT_";

/// Runtime inputs that no interaction profile binds directly.
pub const DEFAULT_EXTRA_INPUTS: &[&str] = &[
    "XRT_INPUT_GENERIC_HEAD_POSE",
    "XRT_INPUT_GENERIC_HEAD_DETECT",
    "XRT_INPUT_GENERIC_HAND_TRACKING_LEFT",
    "XRT_INPUT_GENERIC_HAND_TRACKING_RIGHT",
    "XRT_INPUT_GENERIC_TRACKER_POSE",
];

/// Expected direction of an enumerator, judged by its prefix.
pub fn direction_of(name: &str) -> Option<Direction> {
    if name.starts_with(INPUT_PREFIX) {
        Some(Direction::Input)
    } else if name.starts_with(OUTPUT_PREFIX) {
        Some(Direction::Output)
    } else {
        None
    }
}

/// Sorted, deduplicated input and output enumerators of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingNames {
    inputs: BTreeSet<String>,
    outputs: BTreeSet<String>,
}

impl BindingNames {
    /// Gather every bound enumerator of every expanded component, plus
    /// `extra_inputs`.
    pub fn collect<S: AsRef<str>>(bindings: &Bindings, extra_inputs: &[S]) -> Self {
        let mut names = Self::default();

        for profile in bindings.profiles() {
            for component in profile.components() {
                let Some(name) = component.binding().name() else {
                    continue;
                };
                match component.direction() {
                    Direction::Output => names.outputs.insert(name.to_string()),
                    Direction::Input => names.inputs.insert(name.to_string()),
                };
            }
        }

        names
            .inputs
            .extend(extra_inputs.iter().map(|s| s.as_ref().to_string()));
        names
    }

    /// Input enumerators, sorted.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(String::as_str)
    }

    /// Output enumerators, sorted.
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(String::as_str)
    }

    /// Number of input enumerators.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output enumerators.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Whether `name` is in the set for `direction`.
    pub fn contains(&self, direction: Direction, name: &str) -> bool {
        match direction {
            Direction::Input => self.inputs.contains(name),
            Direction::Output => self.outputs.contains(name),
        }
    }
}
