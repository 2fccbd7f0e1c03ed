//! In-memory property registry.
//!
//! [`InMemoryRegistry`] keeps properties in a `HashMap` behind a `RwLock`.
//! It stands in for the process-wide registry in tests, the CLI, and any
//! embedding that has no host registry of its own.

use std::collections::HashMap;
use std::sync::RwLock;

use secprops_diff::PropertyMap;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::names::validate_property_name;
use crate::traits::PropertyRegistry;

/// An in-memory implementation of [`PropertyRegistry`].
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    properties: RwLock<HashMap<String, String>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `baseline`.
    ///
    /// Every name is validated.
    pub fn with_properties(baseline: &PropertyMap) -> Result<Self> {
        let mut properties = HashMap::with_capacity(baseline.len());
        for (name, value) in baseline {
            validate_property_name(name)?;
            properties.insert(name.clone(), value.clone());
        }
        Ok(Self {
            properties: RwLock::new(properties),
        })
    }

    /// Number of properties currently set.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no properties are set.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, String>>> {
        self.properties
            .read()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.properties
            .write()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }
}

impl PropertyRegistry for InMemoryRegistry {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        validate_property_name(name)?;
        self.write()?.insert(name.to_string(), value.to_string());
        debug!(name, "registry property set");
        Ok(())
    }

    fn clear(&self, name: &str) -> Result<bool> {
        let existed = self.write()?.remove(name).is_some();
        debug!(name, existed, "registry property cleared");
        Ok(existed)
    }

    fn snapshot(&self) -> Result<PropertyMap> {
        Ok(self
            .read()?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
