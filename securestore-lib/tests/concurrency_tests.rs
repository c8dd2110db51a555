//! Concurrency tests for the secret store facade.
//!
//! These tests verify the in-process guard around delete-then-insert.

use securestore_lib::{InMemoryVault, SecretStore};
use std::sync::Arc;
use std::thread;

const RESOURCE: &str = "com.example.concurrency";

#[test]
fn test_concurrent_sets_leave_one_entry() {
    let vault = Arc::new(InMemoryVault::new());
    let store = Arc::new(SecretStore::with_resource(Arc::clone(&vault), RESOURCE).unwrap());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..25 {
                    assert!(store.set("shared", &format!("{}-{}", i, round)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(vault.count(RESOURCE, "shared"), 1);
}

#[test]
fn test_readers_never_observe_gap() {
    let vault = Arc::new(InMemoryVault::new());
    let store = Arc::new(SecretStore::with_resource(Arc::clone(&vault), RESOURCE).unwrap());
    assert!(store.set("k", "initial"));

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500 {
                assert!(store.set("k", &format!("value-{}", i)));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    assert!(store.has("k"), "reader saw the key missing mid-set");
                    assert_ne!(store.get("k", "<absent>"), "<absent>");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_concurrent_deletes_succeed_once() {
    let vault = Arc::new(InMemoryVault::new());
    let store = Arc::new(SecretStore::with_resource(vault, RESOURCE).unwrap());
    assert!(store.set("k", "v"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.delete("k"))
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|deleted| *deleted)
        .count();
    assert_eq!(successes, 1);
}
