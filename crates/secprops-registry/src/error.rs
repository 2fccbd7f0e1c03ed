//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while reading or writing the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The property name is not acceptable.
    #[error("invalid property name: {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
