//! Secret store facade.
//!
//! [`SecretStore`] is a uniform get/set/delete/has surface over an injected
//! [`CredentialVault`]. It offers two flavours of every operation:
//!
//! - `get`, `set`, `delete`, `has` never fail. Failures turn into the default
//!   value or `false`, and are logged when the `tracing` feature is on.
//! - `try_get`, `try_set`, `try_delete`, `try_has` return [`SecretStoreError`]
//!   with the vault's error preserved as the source.
//!
//! # Overwrites
//!
//! The vaults have no atomic upsert, so `set` removes the current entry and
//! then inserts the new one. Inside one process the reader/writer guard
//! (see [`StoreConfig::serialize_access`]) hides the gap from other callers
//! of the same store. Other processes, or other stores over the same scope,
//! can still observe the key as absent between the two steps, and two
//! concurrent writers can leave either value behind.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::StoreConfig;
use crate::errors::{SecretStoreError, VaultOperation};
use crate::vault::{CredentialVault, VaultEntry, VaultError};
use crate::Result;

/// Key-value secret storage over a credential vault.
pub struct SecretStore<V> {
    vault: V,
    config: StoreConfig,
    guard: RwLock<()>,
}

fn lock_error(context: &str) -> SecretStoreError {
    SecretStoreError::Internal(format!("SecretStore: lock poisoned during {}", context))
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SecretStoreError::invalid_input("key", "must not be empty"));
    }
    if key.contains('\0') {
        return Err(SecretStoreError::invalid_input("key", "must not contain NUL"));
    }
    Ok(())
}

/// Collapse a typed result into the never-failing surface.
pub(crate) fn swallow<T>(operation: &'static str, result: Result<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                operation,
                code = ?_err.code(),
                error = %_err,
                "secret store operation failed"
            );
            fallback
        }
    }
}

impl<V: CredentialVault> SecretStore<V> {
    /// Create a store over `vault` with the given configuration.
    ///
    /// # Errors
    /// `InvalidInput` if the configuration does not validate.
    pub fn new(vault: V, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            vault,
            config,
            guard: RwLock::new(()),
        })
    }

    /// Create a store over `vault` for the `resource` scope with default settings.
    pub fn with_resource(vault: V, resource: impl Into<String>) -> Result<Self> {
        Self::new(vault, StoreConfig::new(resource))
    }

    /// Application scope of this store.
    pub fn resource(&self) -> &str {
        &self.config.resource
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    fn read_access(&self, context: &str) -> Result<Option<RwLockReadGuard<'_, ()>>> {
        if !self.config.serialize_access {
            return Ok(None);
        }
        self.guard.read().map(Some).map_err(|_| lock_error(context))
    }

    fn write_access(&self, context: &str) -> Result<Option<RwLockWriteGuard<'_, ()>>> {
        if !self.config.serialize_access {
            return Ok(None);
        }
        self.guard.write().map(Some).map_err(|_| lock_error(context))
    }

    fn lookup(&self, key: &str) -> Result<Option<VaultEntry>> {
        self.vault
            .find(&self.config.resource, key)
            .map_err(|e| SecretStoreError::backend(VaultOperation::Lookup, Some(key), e))
    }

    // ------------------------------------------------------------------------
    // Never-failing surface
    // ------------------------------------------------------------------------

    /// Get the secret stored under `key`, or `default_value` if it is absent
    /// or cannot be read.
    pub fn get(&self, key: &str, default_value: &str) -> String {
        swallow("get", self.try_get(key), None).unwrap_or_else(|| default_value.to_string())
    }

    /// Store `value` under `key`, replacing any existing secret.
    ///
    /// Returns `true` iff the new value was inserted.
    pub fn set(&self, key: &str, value: &str) -> bool {
        swallow("set", self.try_set(key, value).map(|()| true), false)
    }

    /// Like [`set`](Self::set) for callers whose value may be absent.
    ///
    /// `None` is rejected and never reaches the vault.
    pub fn set_optional(&self, key: &str, value: Option<&str>) -> bool {
        swallow("set", self.try_set_optional(key, value).map(|()| true), false)
    }

    /// Delete the secret stored under `key`.
    ///
    /// Returns `false` if there was nothing to delete or the vault refused.
    pub fn delete(&self, key: &str) -> bool {
        swallow("delete", self.try_delete(key), false)
    }

    /// Check whether a secret is stored under `key`.
    pub fn has(&self, key: &str) -> bool {
        swallow("has", self.try_has(key), false)
    }

    // ------------------------------------------------------------------------
    // Typed surface
    // ------------------------------------------------------------------------

    /// Get the secret stored under `key`.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty key
    /// - `BackendRejected` if the vault lookup fails
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(resource = %self.config.resource)))]
    pub fn try_get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let _access = self.read_access("get")?;
        Ok(self.lookup(key)?.map(|entry| entry.value().to_string()))
    }

    /// Get the secret stored under `key`, failing with `NotFound` if absent.
    pub fn require(&self, key: &str) -> Result<String> {
        self.try_get(key)?
            .ok_or_else(|| SecretStoreError::not_found(key))
    }

    /// Store `value` under `key`, replacing any existing secret.
    ///
    /// The existing entry is removed first and the new one inserted after.
    /// If the insert fails the key is left absent, unless
    /// [`StoreConfig::restore_on_failed_set`] is on and the old value could
    /// be put back.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty key
    /// - `BackendRejected` with `Lookup` or `Remove` if the existing entry
    ///   could not be cleared (nothing is inserted then)
    /// - `BackendRejected` with `Add` if the vault refused the new entry
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, value), fields(resource = %self.config.resource)))]
    pub fn try_set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let _access = self.write_access("set")?;

        let previous = match self.lookup(key)? {
            Some(existing) => match self.vault.remove(&existing) {
                Ok(()) | Err(VaultError::NotFound) => Some(existing),
                Err(source) => {
                    return Err(SecretStoreError::backend(
                        VaultOperation::Remove,
                        Some(key),
                        source,
                    ))
                }
            },
            None => None,
        };

        let entry = VaultEntry::new(self.config.resource.as_str(), key, value);
        match self.vault.add(&entry) {
            Ok(()) => Ok(()),
            Err(source) => {
                if self.config.restore_on_failed_set {
                    if let Some(previous) = previous {
                        self.restore(&previous);
                    }
                }
                Err(SecretStoreError::backend(
                    VaultOperation::Add,
                    Some(key),
                    source,
                ))
            }
        }
    }

    fn restore(&self, previous: &VaultEntry) {
        match self.vault.add(previous) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = previous.key(), "restored previous value after failed set");
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(key = previous.key(), error = %_err, "could not restore previous value");
            }
        }
    }

    /// Like [`try_set`](Self::try_set) for callers whose value may be absent.
    ///
    /// # Errors
    /// `InvalidInput` if `value` is `None`; otherwise as `try_set`.
    pub fn try_set_optional(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.try_set(key, value),
            None => Err(SecretStoreError::invalid_input("value", "must not be absent")),
        }
    }

    /// Delete the secret stored under `key`.
    ///
    /// Returns `Ok(false)` if no secret exists for `key`.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty key
    /// - `BackendRejected` if the lookup fails or the vault refuses the
    ///   removal (the secret may still be present)
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(resource = %self.config.resource)))]
    pub fn try_delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let _access = self.write_access("delete")?;

        let Some(existing) = self.lookup(key)? else {
            return Ok(false);
        };
        match self.vault.remove(&existing) {
            Ok(()) => Ok(true),
            // Someone else removed it between the lookup and now
            Err(VaultError::NotFound) => Ok(false),
            Err(source) => Err(SecretStoreError::backend(
                VaultOperation::Remove,
                Some(key),
                source,
            )),
        }
    }

    /// Check whether a secret is stored under `key`.
    pub fn try_has(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let _access = self.read_access("has")?;
        Ok(self.lookup(key)?.is_some())
    }

    /// List the keys stored in this scope, in vault order, without duplicates.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(resource = %self.config.resource)))]
    pub fn keys(&self) -> Result<Vec<String>> {
        let _access = self.read_access("keys")?;
        let entries = self
            .vault
            .retrieve_all(&self.config.resource)
            .map_err(|e| SecretStoreError::backend(VaultOperation::Enumerate, None, e))?;

        let mut keys: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !keys.iter().any(|k| k == entry.key()) {
                keys.push(entry.key().to_string());
            }
        }
        Ok(keys)
    }

    /// Remove every secret in this scope.
    ///
    /// Returns the number of entries removed. Stops at the first entry the
    /// vault refuses to remove.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(resource = %self.config.resource)))]
    pub fn clear(&self) -> Result<usize> {
        let _access = self.write_access("clear")?;
        let entries = self
            .vault
            .retrieve_all(&self.config.resource)
            .map_err(|e| SecretStoreError::backend(VaultOperation::Enumerate, None, e))?;

        let mut removed = 0;
        for entry in &entries {
            match self.vault.remove(entry) {
                Ok(()) => removed += 1,
                Err(VaultError::NotFound) => {}
                Err(source) => {
                    return Err(SecretStoreError::backend(
                        VaultOperation::Remove,
                        Some(entry.key()),
                        source,
                    ))
                }
            }
        }
        Ok(removed)
    }
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
impl SecretStore<crate::vault::NativeVault> {
    /// Create a store over the OS-native vault for the compile target.
    pub fn native(config: StoreConfig) -> Result<Self> {
        Self::new(crate::vault::native_vault(), config)
    }
}
