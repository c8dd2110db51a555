//! End-to-end scenarios for the secret store facade.

use securestore_lib::{
    CredentialVault, InMemoryVault, SecretStore, SecretStoreError, SecretStoreErrorCode,
    StoreConfig, VaultEntry, VaultError, VaultOperation,
};
use std::error::Error;
use std::sync::Arc;

const RESOURCE: &str = "com.example.app";

fn setup() -> (Arc<InMemoryVault>, SecretStore<Arc<InMemoryVault>>) {
    let vault = Arc::new(InMemoryVault::new());
    let store = SecretStore::with_resource(Arc::clone(&vault), RESOURCE).unwrap();
    (vault, store)
}

#[test]
fn test_api_token_lifecycle() {
    let (_vault, store) = setup();

    assert!(store.set("api_token", "abc123"));
    assert_eq!(store.get("api_token", "none"), "abc123");
    assert!(store.delete("api_token"));
    assert_eq!(store.get("api_token", "none"), "none");
    assert!(!store.delete("api_token"));
}

#[test]
fn test_overwrite_leaves_one_entry() {
    let (vault, store) = setup();

    assert!(store.set("k", "v1"));
    assert!(store.set("k", "v2"));
    assert_eq!(store.get("k", ""), "v2");

    let entries = vault.retrieve_all(RESOURCE).unwrap();
    assert_eq!(entries.iter().filter(|e| e.key() == "k").count(), 1);
}

#[test]
fn test_first_match_wins_for_preexisting_duplicates() {
    let (vault, store) = setup();

    // Duplicates can only come from outside the store
    vault.add(&VaultEntry::new(RESOURCE, "dup", "first")).unwrap();
    vault.add(&VaultEntry::new(RESOURCE, "dup", "second")).unwrap();

    assert_eq!(store.get("dup", ""), "first");
    assert!(store.delete("dup"));
    assert_eq!(store.get("dup", ""), "second");
}

#[test]
fn test_set_then_delete_then_has() {
    let (_vault, store) = setup();

    for (key, value) in [("a", "1"), ("b", ""), ("unicode-ключ", "значение ✓")] {
        assert!(store.set(key, value));
        assert!(store.delete(key));
        assert!(!store.has(key));
    }
}

#[test]
fn test_rejected_insert_preserves_cause() {
    let (vault, store) = setup();
    vault.fail_adds(true);

    let err = store.try_set("k", "v").unwrap_err();
    assert_eq!(err.code(), SecretStoreErrorCode::BackendRejected);

    let source = err.source().expect("vault error is kept as source");
    assert!(source.to_string().contains("quota exceeded"));
    match err {
        SecretStoreError::BackendRejected { operation, key, .. } => {
            assert_eq!(operation, VaultOperation::Add);
            assert_eq!(key.as_deref(), Some("k"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_locked_vault_is_reported_as_access_denied() {
    let (vault, store) = setup();
    vault.fail_enumeration(true);

    let err = store.try_has("k").unwrap_err();
    assert!(err.requires_auth());
    assert!(matches!(err.vault_error(), Some(VaultError::Locked)));
    assert!(!store.has("k"));
}

#[test]
fn test_store_from_json_config() {
    let config = StoreConfig::from_json(
        r#"{"resource": "com.example.json", "restore_on_failed_set": true}"#,
    )
    .unwrap();
    let vault = Arc::new(InMemoryVault::new());
    let store = SecretStore::new(Arc::clone(&vault), config).unwrap();

    assert!(store.set("k", "v"));
    assert_eq!(vault.count("com.example.json", "k"), 1);
    assert_eq!(vault.count(RESOURCE, "k"), 0);
}

#[test]
fn test_dyn_vault_store() {
    let vault: Box<dyn CredentialVault> = Box::new(InMemoryVault::new());
    let store = SecretStore::with_resource(vault, RESOURCE).unwrap();

    assert_eq!(store.vault().backend_name(), "memory");
    assert!(store.set("k", "v"));
    assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
}
