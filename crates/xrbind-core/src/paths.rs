//! # Length Buckets
//!
//! The generated verify functions switch on the byte length of the
//! candidate path before doing any string comparison. [`PathBuckets`]
//! groups a profile's canonical paths by length, ascending, keeping the
//! first-seen order inside a bucket and dropping duplicates (the bare
//! `base` path is shared by every component of a sub-path).
//!
//! [`PathBuckets::matches`] evaluates a path exactly the way the generated
//! C function does, which lets the acceptance property be checked in-process.

use std::collections::BTreeMap;

use crate::profile::Profile;

/// Canonical paths of one profile, bucketed by byte length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuckets {
    buckets: BTreeMap<usize, Vec<String>>,
}

impl PathBuckets {
    /// Collect every canonical path of every component of `profile`.
    pub fn from_profile(profile: &Profile) -> Self {
        let mut buckets = Self::default();
        for component in profile.components() {
            for path in component.paths() {
                buckets.insert(path);
            }
        }
        buckets
    }

    /// Add a path; returns `false` if it was already present.
    pub fn insert(&mut self, path: String) -> bool {
        let bucket = self.buckets.entry(path.len()).or_default();
        if bucket.contains(&path) {
            false
        } else {
            bucket.push(path);
            true
        }
    }

    /// Buckets in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.buckets.iter().map(|(len, paths)| (*len, paths.as_slice()))
    }

    /// The paths of a given length.
    pub fn bucket(&self, length: usize) -> Option<&[String]> {
        self.buckets.get(&length).map(Vec::as_slice)
    }

    /// Number of distinct lengths.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of distinct paths.
    pub fn path_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if no paths were collected.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Length gate, then exact comparison.
    pub fn matches(&self, path: &str) -> bool {
        self.bucket(path.len())
            .is_some_and(|bucket| bucket.iter().any(|p| p == path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Bindings;
    use serde_json::json;

    fn simple_controller() -> Bindings {
        Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/simple_controller": {
                    "title": "Khronos Simple Controller",
                    "type": "khr_simple_controller",
                    "monado_device": "XRT_DEVICE_SIMPLE_CONTROLLER",
                    "subaction_paths": ["/user/hand/left", "/user/hand/right"],
                    "subpaths": {
                        "/input/select": {
                            "type": "button",
                            "localized_name": "Select",
                            "components": ["click"],
                            "monado_bindings": { "click": "XRT_INPUT_SIMPLE_SELECT_CLICK" }
                        },
                        "/input/grip": {
                            "type": "pose",
                            "localized_name": "Grip",
                            "components": ["pose"],
                            "monado_bindings": { "pose": "XRT_INPUT_SIMPLE_GRIP_POSE" }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn buckets_are_keyed_by_byte_length_ascending() {
        let bindings = simple_controller();
        let buckets = PathBuckets::from_profile(&bindings.profiles()[0]);
        let lengths: Vec<usize> = buckets.iter().map(|(len, _)| len).collect();
        let mut sorted = lengths.clone();
        sorted.sort_unstable();
        assert_eq!(lengths, sorted);
        for (len, paths) in buckets.iter() {
            assert!(paths.iter().all(|p| p.len() == len));
        }
    }

    #[test]
    fn both_hands_are_collected() {
        let bindings = simple_controller();
        let buckets = PathBuckets::from_profile(&bindings.profiles()[0]);
        assert!(buckets.matches("/user/hand/left/input/select/click"));
        assert!(buckets.matches("/user/hand/right/input/select/click"));
        assert!(buckets.matches("/user/hand/left/input/grip"));
        assert!(buckets.matches("/user/hand/right/input/grip/pose"));
        assert_eq!(buckets.path_count(), 8);
    }

    #[test]
    fn shared_base_path_is_deduplicated() {
        let mut buckets = PathBuckets::default();
        assert!(buckets.insert("/user/hand/left/input/trigger".to_string()));
        assert!(!buckets.insert("/user/hand/left/input/trigger".to_string()));
        assert_eq!(buckets.path_count(), 1);
        assert_eq!(buckets.bucket_count(), 1);
    }

    #[test]
    fn first_seen_order_within_bucket() {
        let mut buckets = PathBuckets::default();
        buckets.insert("/b".to_string());
        buckets.insert("/a".to_string());
        buckets.insert("/c".to_string());
        assert_eq!(buckets.bucket(2).unwrap(), ["/b", "/a", "/c"]);
    }

    #[test]
    fn matches_rejects_undeclared_and_prefix_paths() {
        let bindings = simple_controller();
        let buckets = PathBuckets::from_profile(&bindings.profiles()[0]);
        assert!(!buckets.matches(""));
        assert!(!buckets.matches("/user/hand/left"));
        assert!(!buckets.matches("/user/hand/left/input/select/clic"));
        assert!(!buckets.matches("/user/hand/left/input/select/click/"));
        assert!(!buckets.matches("/user/head/input/select/click"));
    }

    #[test]
    fn empty_profile_has_no_buckets() {
        let bindings = Bindings::from_value(&json!({
            "profiles": {
                "/interaction_profiles/khr/empty": {
                    "title": "Empty",
                    "type": "none",
                    "monado_device": "XRT_DEVICE_NONE",
                    "subaction_paths": [],
                    "subpaths": {}
                }
            }
        }))
        .unwrap();
        let buckets = PathBuckets::from_profile(&bindings.profiles()[0]);
        assert!(buckets.is_empty());
        assert!(!buckets.matches("/user/hand/left"));
    }
}
