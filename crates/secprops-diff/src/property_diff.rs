//! Three-way diff between a desired and a current property set.
//!
//! Property sets are `BTreeMap<String, String>` so every output iterates in
//! key order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::change::PropertyChange;

/// A set of properties keyed by name.
pub type PropertyMap = BTreeMap<String, String>;

/// How a property set changed between two snapshots.
///
/// The three maps are pairwise disjoint by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDiff {
    /// Keys only in the desired set, with their desired value.
    pub added: PropertyMap,
    /// Keys only in the current set, with their current value.
    pub removed: PropertyMap,
    /// Keys in both sets whose value differs, with the desired value.
    pub updated: PropertyMap,
}

impl PropertyDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the two snapshots were equal.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Total number of changed keys.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }

    /// Number of added keys.
    pub fn additions(&self) -> usize {
        self.added.len()
    }

    /// Number of removed keys.
    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    /// Number of updated keys.
    pub fn updates(&self) -> usize {
        self.updated.len()
    }

    /// Returns `true` if `key` is classified in any of the three buckets.
    pub fn touches(&self, key: &str) -> bool {
        self.added.contains_key(key)
            || self.removed.contains_key(key)
            || self.updated.contains_key(key)
    }

    /// Flatten into per-key changes ordered by key.
    ///
    /// `current` is the set the diff was computed against; it supplies the
    /// old value of updated keys. A key missing from `current` yields an
    /// empty old value.
    pub fn changes_against(&self, current: &PropertyMap) -> Vec<PropertyChange> {
        let mut changes: BTreeMap<&str, PropertyChange> = BTreeMap::new();

        for (key, value) in &self.added {
            changes.insert(key, PropertyChange::Added {
                key: key.clone(),
                value: value.clone(),
            });
        }
        for (key, value) in &self.removed {
            changes.insert(key, PropertyChange::Removed {
                key: key.clone(),
                value: value.clone(),
            });
        }
        for (key, new) in &self.updated {
            changes.insert(key, PropertyChange::Updated {
                key: key.clone(),
                old: current.get(key).cloned().unwrap_or_default(),
                new: new.clone(),
            });
        }

        changes.into_values().collect()
    }

    /// Transform `current` into the desired set this diff was computed from.
    pub fn apply_to(&self, current: &mut PropertyMap) {
        for key in self.removed.keys() {
            current.remove(key);
        }
        for (key, value) in self.added.iter().chain(&self.updated) {
            current.insert(key.clone(), value.clone());
        }
    }
}

/// Compute the diff that takes `current` to `desired`.
pub fn diff_properties(desired: &PropertyMap, current: &PropertyMap) -> PropertyDiff {
    let mut diff = PropertyDiff::new();
    diff_into(
        desired,
        current,
        &mut diff.added,
        &mut diff.removed,
        &mut diff.updated,
    );
    diff
}

/// Classify keys into caller-supplied output maps.
///
/// Only inserts into `added`, `removed` and `updated`; existing entries in
/// them are left alone. Neither input is modified.
pub fn diff_into(
    desired: &PropertyMap,
    current: &PropertyMap,
    added: &mut PropertyMap,
    removed: &mut PropertyMap,
    updated: &mut PropertyMap,
) {
    for (key, new_val) in desired {
        match current.get(key) {
            Some(old_val) => {
                if old_val != new_val {
                    updated.insert(key.clone(), new_val.clone());
                }
            }
            None => {
                added.insert(key.clone(), new_val.clone());
            }
        }
    }

    for (key, old_val) in current {
        if !desired.contains_key(key) {
            removed.insert(key.clone(), old_val.clone());
        }
    }
}
