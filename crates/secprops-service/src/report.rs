//! Outcome of applying a property set.

use chrono::{DateTime, Utc};
use secprops_diff::{PropertyDiff, PropertyMap};
use serde::{Deserialize, Serialize};

/// What happened to a property the service stopped managing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Restoration {
    /// The registry had a value before the service wrote one; it is back.
    Restored { original: String },
    /// The registry had no value before; the property is gone again.
    Cleared,
}

/// Result of one `apply` (or `start`/`stop`) call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// The diff between the previously applied set and the desired one.
    pub diff: PropertyDiff,
    /// Removed keys whose original registry value was put back.
    pub restored: PropertyMap,
    /// Removed keys that had no original value and were cleared.
    pub cleared: Vec<String>,
    /// When the apply finished.
    pub applied_at: DateTime<Utc>,
}

impl ApplyReport {
    pub(crate) fn new(diff: PropertyDiff) -> Self {
        Self {
            diff,
            restored: PropertyMap::new(),
            cleared: Vec::new(),
            applied_at: Utc::now(),
        }
    }

    pub(crate) fn record(&mut self, name: &str, restoration: Restoration) {
        match restoration {
            Restoration::Restored { original } => {
                self.restored.insert(name.to_string(), original);
            }
            Restoration::Cleared => self.cleared.push(name.to_string()),
        }
    }

    /// Returns `true` if the registry was not touched.
    pub fn is_noop(&self) -> bool {
        self.diff.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_restorations() {
        let mut report = ApplyReport::new(PropertyDiff::new());
        report.record(
            "a",
            Restoration::Restored {
                original: "orig".into(),
            },
        );
        report.record("b", Restoration::Cleared);

        assert_eq!(report.restored["a"], "orig");
        assert_eq!(report.cleared, vec!["b".to_string()]);
        assert!(report.is_noop());
    }

    #[test]
    fn serializes_to_json() {
        let report = ApplyReport::new(PropertyDiff::new());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["diff"]["added"].as_object().unwrap().is_empty());
        assert!(json["applied_at"].is_string());
    }
}
