//! Security property registry.
//!
//! A registry is the process-wide home of security properties: a flat
//! namespace of `name -> value` strings that security providers consult at
//! runtime. The service layer writes into a registry; it never owns one.
//!
//! # Modules
//!
//! - [`error`] — Error types for registry operations
//! - [`names`] — Property name validation
//! - [`traits`] — The [`PropertyRegistry`] trait
//! - [`memory`] — In-memory [`InMemoryRegistry`]

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{RegistryError, Result};
pub use memory::InMemoryRegistry;
pub use names::validate_property_name;
pub use traits::PropertyRegistry;
