//! In-memory credential vault.
//!
//! This implementation is for testing and development only.
//! In production, use the native vault for the target platform.
//!
//! Unlike the native vaults it does not enforce one entry per key: `add`
//! always appends. That keeps the store's delete-before-insert discipline
//! observable through [`InMemoryVault::count`].
//!
//! # Fault Injection
//!
//! Each primitive can be switched to fail, which is how the store's
//! rejection paths are exercised in tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use super::traits::{CredentialVault, VaultEntry, VaultError, VaultResult};

/// In-memory implementation of a credential vault.
///
/// **Warning**: This is for testing only. Values are not encrypted
/// and will be lost when the process exits.
pub struct InMemoryVault {
    entries: RwLock<Vec<VaultEntry>>,
    fail_adds: AtomicBool,
    fail_removes: AtomicBool,
    fail_enumeration: AtomicBool,
    operations: AtomicUsize,
}

/// Helper function to handle lock poisoning gracefully.
fn lock_error(context: &str) -> VaultError {
    VaultError::Platform(format!("InMemoryVault: lock poisoned during {}", context))
}

impl InMemoryVault {
    /// Create a new, empty in-memory vault.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            fail_adds: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
            fail_enumeration: AtomicBool::new(false),
            operations: AtomicUsize::new(0),
        }
    }

    /// Make every `add` fail with [`VaultError::QuotaExceeded`].
    pub fn fail_adds(&self, fail: bool) {
        self.fail_adds.store(fail, Ordering::SeqCst);
    }

    /// Make every `remove` fail with [`VaultError::AccessDenied`].
    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Make every enumeration and lookup fail with [`VaultError::Locked`].
    pub fn fail_enumeration(&self, fail: bool) {
        self.fail_enumeration.store(fail, Ordering::SeqCst);
    }

    /// Number of primitive calls made against this vault.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of entries stored under `(resource, key)`.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn count(&self, resource: &str, key: &str) -> usize {
        self.entries
            .read()
            .map(|entries| entries.iter().filter(|e| e.matches(resource, key)).count())
            .unwrap_or(0)
    }

    /// Total number of entries across all scopes.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the vault is empty.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }

    fn tick(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVault for InMemoryVault {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        self.tick();
        if self.fail_adds.load(Ordering::SeqCst) {
            return Err(VaultError::QuotaExceeded("injected add failure".into()));
        }

        let mut entries = self.entries.write().map_err(|_| lock_error("add"))?;
        entries.push(entry.clone());
        Ok(())
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        self.tick();
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(VaultError::AccessDenied("injected remove failure".into()));
        }

        let mut entries = self.entries.write().map_err(|_| lock_error("remove"))?;
        match entries
            .iter()
            .position(|e| e.matches(entry.resource(), entry.key()))
        {
            Some(index) => {
                entries.remove(index);
                Ok(())
            }
            None => Err(VaultError::NotFound),
        }
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        self.tick();
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(VaultError::Locked);
        }

        let entries = self.entries.read().map_err(|_| lock_error("retrieve_all"))?;
        Ok(entries
            .iter()
            .filter(|e| e.resource() == resource)
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let vault = InMemoryVault::new();
        vault.add(&VaultEntry::new("app", "k", "v")).unwrap();

        let found = vault.find("app", "k").unwrap().unwrap();
        assert_eq!(found.value(), "v");
        assert!(vault.find("other-app", "k").unwrap().is_none());
    }

    #[test]
    fn test_add_does_not_dedupe() {
        let vault = InMemoryVault::new();
        vault.add(&VaultEntry::new("app", "k", "v1")).unwrap();
        vault.add(&VaultEntry::new("app", "k", "v2")).unwrap();

        assert_eq!(vault.count("app", "k"), 2);
        assert_eq!(vault.find("app", "k").unwrap().unwrap().value(), "v1");
    }

    #[test]
    fn test_remove_missing() {
        let vault = InMemoryVault::new();
        let result = vault.remove(&VaultEntry::new("app", "k", "v"));
        assert!(matches!(result, Err(VaultError::NotFound)));
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let vault = InMemoryVault::new();
        vault.add(&VaultEntry::new("app", "k", "v1")).unwrap();
        vault.add(&VaultEntry::new("app", "k", "v2")).unwrap();

        vault.remove(&VaultEntry::new("app", "k", "")).unwrap();
        assert_eq!(vault.count("app", "k"), 1);
        assert_eq!(vault.find("app", "k").unwrap().unwrap().value(), "v2");
    }

    #[test]
    fn test_injected_failures() {
        let vault = InMemoryVault::new();

        vault.fail_adds(true);
        assert!(matches!(
            vault.add(&VaultEntry::new("app", "k", "v")),
            Err(VaultError::QuotaExceeded(_))
        ));
        vault.fail_adds(false);
        vault.add(&VaultEntry::new("app", "k", "v")).unwrap();

        vault.fail_removes(true);
        assert!(matches!(
            vault.remove(&VaultEntry::new("app", "k", "v")),
            Err(VaultError::AccessDenied(_))
        ));

        vault.fail_enumeration(true);
        assert!(matches!(vault.find("app", "k"), Err(VaultError::Locked)));
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn test_operation_counter() {
        let vault = InMemoryVault::new();
        assert_eq!(vault.operations(), 0);

        vault.add(&VaultEntry::new("app", "k", "v")).unwrap();
        vault.retrieve_all("app").unwrap();
        assert_eq!(vault.operations(), 2);
    }
}
