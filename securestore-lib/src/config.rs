//! Configuration for the secret store.

use serde::{Deserialize, Serialize};

use crate::errors::SecretStoreError;

/// Configuration for a [`SecretStore`](crate::SecretStore).
///
/// # Example
///
/// ```
/// use securestore_lib::StoreConfig;
///
/// let config = StoreConfig::new("com.example.app").with_restore_on_failed_set(true);
/// assert_eq!(config.resource, "com.example.app");
/// assert!(config.serialize_access);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Application scope inside the vault. Every secret this store touches
    /// lives under this resource name.
    pub resource: String,

    /// Serialize operations of this process behind a reader/writer guard, so
    /// readers never see the gap between the delete and the insert of a `set`.
    #[serde(default = "default_serialize_access")]
    pub serialize_access: bool,

    /// When the insert of a `set` fails after the old value was removed,
    /// put the old value back before reporting the failure.
    #[serde(default)]
    pub restore_on_failed_set: bool,
}

fn default_serialize_access() -> bool {
    true
}

impl StoreConfig {
    /// Create a configuration for the given application scope.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            serialize_access: default_serialize_access(),
            restore_on_failed_set: false,
        }
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SecretStoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable the in-process reader/writer guard.
    pub fn with_serialize_access(mut self, serialize: bool) -> Self {
        self.serialize_access = serialize;
        self
    }

    /// Enable or disable restoring the previous value on a failed set.
    pub fn with_restore_on_failed_set(mut self, restore: bool) -> Self {
        self.restore_on_failed_set = restore;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), SecretStoreError> {
        if self.resource.trim().is_empty() {
            return Err(SecretStoreError::invalid_input(
                "resource",
                "must not be empty",
            ));
        }
        if self.resource.contains('\0') {
            return Err(SecretStoreError::invalid_input(
                "resource",
                "must not contain NUL",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("app");
        assert!(config.serialize_access);
        assert!(!config.restore_on_failed_set);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_applies_serde_defaults() {
        let config = StoreConfig::from_json(r#"{"resource": "com.example.app"}"#).unwrap();
        assert_eq!(config, StoreConfig::new("com.example.app"));

        let config = StoreConfig::from_json(
            r#"{"resource": "app", "serialize_access": false, "restore_on_failed_set": true}"#,
        )
        .unwrap();
        assert!(!config.serialize_access);
        assert!(config.restore_on_failed_set);
    }

    #[test]
    fn test_rejects_empty_resource() {
        let err = StoreConfig::from_json(r#"{"resource": "  "}"#).unwrap_err();
        assert!(err.to_string().contains("resource"));

        assert!(StoreConfig::from_json("not json").is_err());
    }
}
