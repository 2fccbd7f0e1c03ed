//! Property name validation.
//!
//! Valid property names:
//! - Must be non-empty
//! - Must not contain whitespace, control characters, `=` or `:`
//! - Must not contain `..`
//! - Must not start or end with `.`
//!
//! The `=` and `:` exclusions keep names representable in the
//! `key=value` / `key: value` properties-file syntax.

use crate::error::{RegistryError, Result};

/// Characters that are forbidden anywhere in a property name.
const FORBIDDEN_CHARS: &[char] = &['=', ':'];

/// Validate a property name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use secprops_registry::names::validate_property_name;
///
/// assert!(validate_property_name("jdk.tls.disabledAlgorithms").is_ok());
/// assert!(validate_property_name("securerandom.source").is_ok());
/// assert!(validate_property_name("").is_err());
/// assert!(validate_property_name("a..b").is_err());
/// ```
pub fn validate_property_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "property name must not be empty".into()));
    }

    if let Some(ch) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid(
            name,
            format!("contains whitespace or control character: {ch:?}"),
        ));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
        }
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'".into()));
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid(name, "must not start or end with '.'".into()));
    }

    Ok(())
}

fn invalid(name: &str, reason: String) -> RegistryError {
    RegistryError::InvalidName {
        name: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in [
            "key1",
            "jdk.certpath.disabledAlgorithms",
            "security.provider.1",
            "ssl.KeyManagerFactory.algorithm",
            "networkaddress.cache.ttl",
            "x-custom_prop",
        ] {
            assert!(validate_property_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn empty_name_rejected() {
        let err = validate_property_name("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn whitespace_rejected() {
        assert!(validate_property_name("has space").is_err());
        assert!(validate_property_name("tab\tname").is_err());
        assert!(validate_property_name("line\nbreak").is_err());
    }

    #[test]
    fn control_chars_rejected() {
        assert!(validate_property_name("nul\0byte").is_err());
    }

    #[test]
    fn separators_rejected() {
        assert!(validate_property_name("a=b").is_err());
        assert!(validate_property_name("a:b").is_err());
    }

    #[test]
    fn dot_rules() {
        assert!(validate_property_name(".leading").is_err());
        assert!(validate_property_name("trailing.").is_err());
        assert!(validate_property_name("double..dot").is_err());
    }

    #[test]
    fn error_carries_name() {
        match validate_property_name("a=b") {
            Err(RegistryError::InvalidName { name, .. }) => assert_eq!(name, "a=b"),
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }
}
