//! Key-set differ for security property maps.
//!
//! Given the property set that is currently applied and the one an
//! administrator wants applied, classify every key as added, removed or
//! updated. Keys whose value did not change are left out entirely.
//!
//! # Key Types
//!
//! - [`PropertyMap`] -- ordered `String -> String` property set
//! - [`PropertyDiff`] -- three-way partition produced by [`diff_properties`]
//! - [`PropertyChange`] -- flattened per-key view used for reporting

pub mod change;
pub mod property_diff;

pub use change::PropertyChange;
pub use property_diff::{diff_into, diff_properties, PropertyDiff, PropertyMap};
