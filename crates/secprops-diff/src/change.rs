//! Per-key view of a property diff.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single change to one property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyChange {
    /// The property is new in the desired set.
    Added { key: String, value: String },
    /// The property is no longer in the desired set.
    Removed { key: String, value: String },
    /// The property exists in both sets with a different value.
    Updated {
        key: String,
        old: String,
        new: String,
    },
}

impl PropertyChange {
    /// The property name this change applies to.
    pub fn key(&self) -> &str {
        match self {
            Self::Added { key, .. } | Self::Removed { key, .. } | Self::Updated { key, .. } => key,
        }
    }

    /// Single-character marker used in textual listings.
    pub fn marker(&self) -> char {
        match self {
            Self::Added { .. } => '+',
            Self::Removed { .. } => '-',
            Self::Updated { .. } => '~',
        }
    }
}

impl fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { key, value } => write!(f, "+ {key}={value}"),
            Self::Removed { key, value } => write!(f, "- {key}={value}"),
            Self::Updated { key, old, new } => write!(f, "~ {key}={old} -> {new}"),
        }
    }
}
