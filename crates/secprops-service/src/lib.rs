//! Security property service.
//!
//! Applies a declared set of security properties to a
//! [`PropertyRegistry`](secprops_registry::PropertyRegistry) and keeps enough
//! state to undo it: each property's value before the service first wrote it
//! is remembered, so dropping a property from the desired set puts the
//! registry back the way it was.

pub mod config;
pub mod error;
pub mod report;
pub mod service;

pub use config::{PropertiesConfig, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use report::{ApplyReport, Restoration};
pub use service::SecurityPropertyService;

pub use secprops_diff::{PropertyDiff, PropertyMap};
