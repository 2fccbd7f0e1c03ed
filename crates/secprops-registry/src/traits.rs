//! The [`PropertyRegistry`] trait defining the registry interface.

use secprops_diff::PropertyMap;

use crate::error::Result;

/// Storage backend for security properties.
///
/// Implementations must be thread-safe (`Send + Sync`). A property that has
/// never been set and one that has been cleared are indistinguishable.
pub trait PropertyRegistry: Send + Sync {
    /// Read a property.
    ///
    /// Returns `Ok(None)` if the property is not set.
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Create or overwrite a property.
    fn set(&self, name: &str, value: &str) -> Result<()>;

    /// Remove a property.
    ///
    /// Returns `Ok(true)` if the property existed, `Ok(false)` otherwise.
    fn clear(&self, name: &str) -> Result<bool>;

    /// Copy of every property currently set.
    fn snapshot(&self) -> Result<PropertyMap>;

    /// Returns `true` if the property is set.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }
}
