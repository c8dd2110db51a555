//! Core traits for credential vault backends.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

/// Error reported by a vault backend.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The vault refused access to the entry or scope.
    #[error("access denied: {0}")]
    AccessDenied(String),
    /// The vault (or collection) is locked and could not be unlocked.
    #[error("vault is locked")]
    Locked,
    /// The vault is full or the entry exceeds a size limit.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    /// The vault refused the entry for another reason.
    #[error("entry rejected: {0}")]
    Rejected(String),
    /// The entry does not exist.
    #[error("credential not found")]
    NotFound,
    /// The vault service could not be reached.
    #[error("vault unavailable: {0}")]
    Unavailable(String),
    /// Any other platform error.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Result type for vault operations.
pub type VaultResult<T> = std::result::Result<T, VaultError>;

/// A single credential stored in a vault.
///
/// `resource` is the application scope, `key` the lookup identity and
/// `value` the secret payload. The value is wiped from memory on drop and
/// never shows up in `Debug` output.
#[derive(Clone)]
pub struct VaultEntry {
    resource: String,
    key: String,
    value: Zeroizing<String>,
}

impl VaultEntry {
    /// Create a new entry.
    pub fn new(
        resource: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            key: key.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    /// Application scope the entry belongs to.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Lookup identity of the entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Secret payload.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check whether this entry is the one stored under `(resource, key)`.
    pub fn matches(&self, resource: &str, key: &str) -> bool {
        self.resource == resource && self.key == key
    }
}

impl fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntry")
            .field("resource", &self.resource)
            .field("key", &self.key)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// An OS-owned collection of named credentials.
///
/// The store never owns the vault's lifecycle; it only calls these
/// primitives. Implementations provide whatever atomicity the platform offers
/// for a single call and nothing more.
pub trait CredentialVault: Send + Sync {
    /// Insert an entry.
    ///
    /// # Errors
    /// Any [`VaultError`] if the platform refuses to store the entry.
    fn add(&self, entry: &VaultEntry) -> VaultResult<()>;

    /// Remove an entry previously returned by [`find`](Self::find) or
    /// [`retrieve_all`](Self::retrieve_all).
    ///
    /// # Errors
    /// - `NotFound` if the entry no longer exists
    /// - any other [`VaultError`] if the platform refuses the removal
    fn remove(&self, entry: &VaultEntry) -> VaultResult<()>;

    /// Enumerate every entry in the `resource` scope, in vault order.
    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>>;

    /// Find the first entry stored under `(resource, key)`.
    ///
    /// The default scans [`retrieve_all`](Self::retrieve_all), which is O(n)
    /// in the number of entries of the scope. Backends with a native point
    /// lookup should override it.
    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        Ok(self
            .retrieve_all(resource)?
            .into_iter()
            .find(|entry| entry.key() == key))
    }

    /// Short backend name for diagnostics.
    fn backend_name(&self) -> &'static str;
}

impl<V: CredentialVault + ?Sized> CredentialVault for Arc<V> {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        (**self).add(entry)
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        (**self).remove(entry)
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        (**self).retrieve_all(resource)
    }

    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        (**self).find(resource, key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

impl<V: CredentialVault + ?Sized> CredentialVault for Box<V> {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        (**self).add(entry)
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        (**self).remove(entry)
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        (**self).retrieve_all(resource)
    }

    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        (**self).find(resource, key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVault(Vec<VaultEntry>);

    impl CredentialVault for FixedVault {
        fn add(&self, _entry: &VaultEntry) -> VaultResult<()> {
            Err(VaultError::Rejected("read-only".into()))
        }

        fn remove(&self, _entry: &VaultEntry) -> VaultResult<()> {
            Err(VaultError::Rejected("read-only".into()))
        }

        fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
            Ok(self
                .0
                .iter()
                .filter(|e| e.resource() == resource)
                .cloned()
                .collect())
        }

        fn backend_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_entry_debug_redacts_value() {
        let entry = VaultEntry::new("app", "api_token", "abc123");
        let debug = format!("{:?}", entry);
        assert!(debug.contains("api_token"));
        assert!(!debug.contains("abc123"));
    }

    #[test]
    fn test_default_find_returns_first_match() {
        let vault = FixedVault(vec![
            VaultEntry::new("other", "k", "wrong-scope"),
            VaultEntry::new("app", "k", "first"),
            VaultEntry::new("app", "k", "second"),
        ]);

        let found = vault.find("app", "k").unwrap().unwrap();
        assert_eq!(found.value(), "first");
        assert!(vault.find("app", "missing").unwrap().is_none());
    }

    #[test]
    fn test_boxed_dyn_vault_delegates() {
        let vault: Box<dyn CredentialVault> =
            Box::new(FixedVault(vec![VaultEntry::new("app", "k", "v")]));
        assert_eq!(vault.backend_name(), "fixed");
        assert_eq!(vault.retrieve_all("app").unwrap().len(), 1);
        assert!(vault.add(&VaultEntry::new("app", "x", "y")).is_err());
    }
}
