//! TOML configuration for the property service.
//!
//! ```toml
//! [service]
//! restore_on_stop = true
//!
//! [properties]
//! "securerandom.source" = "file:/dev/urandom"
//! jdk.tls.disabledAlgorithms = "SSLv3, TLSv1"
//! networkaddress.cache.ttl = 30
//! ```
//!
//! Dotted keys and nested tables under `[properties]` are flattened back
//! into dotted property names, so both spellings above are equivalent. Two
//! spellings that flatten to the same name are rejected.
//!
//! Integers, booleans and datetimes are stored in their TOML form. Floats
//! always keep a fractional part or exponent (`1.0`, `1e300`). Arrays are
//! rejected.

use std::path::Path;

use secprops_diff::PropertyMap;
use secprops_registry::{validate_property_name, RegistryError};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Service behaviour switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Restore every applied property to its original value on stop.
    pub restore_on_stop: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            restore_on_stop: true,
        }
    }
}

/// A parsed properties document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesConfig {
    pub service: ServiceConfig,
    pub properties: PropertyMap,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    service: ServiceConfig,
    #[serde(default)]
    properties: toml::Table,
}

impl PropertiesConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> ServiceResult<Self> {
        let raw: RawConfig =
            toml::from_str(input).map_err(|e| ServiceError::Config(e.to_string()))?;

        let mut properties = PropertyMap::new();
        flatten_table("", &raw.properties, &mut properties)?;

        Ok(Self {
            service: raw.service,
            properties,
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Every property name that fails validation, in key order.
    pub fn invalid_names(&self) -> Vec<RegistryError> {
        self.properties
            .keys()
            .filter_map(|name| validate_property_name(name).err())
            .collect()
    }
}

fn flatten_table(prefix: &str, table: &toml::Table, out: &mut PropertyMap) -> ServiceResult<()> {
    for (key, value) in table {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let text = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => format!("{f:?}"),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(d) => d.to_string(),
            toml::Value::Table(nested) => {
                flatten_table(&name, nested, out)?;
                continue;
            }
            toml::Value::Array(_) => {
                return Err(ServiceError::Config(format!(
                    "property {name:?}: arrays are not supported"
                )));
            }
        };
        if out.contains_key(&name) {
            return Err(ServiceError::Config(format!("duplicate property {name:?}")));
        }
        out.insert(name, text);
    }
    Ok(())
}
