//! Secure key-value storage for string secrets.
//!
//! This crate stores, retrieves, checks and deletes secrets keyed by name in
//! an OS-native credential vault. All durable state lives in the vault; the
//! crate only validates input, calls the vault and translates the outcome.
//!
//! # Features
//!
//! - **Facade**: [`SecretStore`] with a never-failing `get`/`set`/`delete`/`has`
//!   surface and a typed `try_*` surface that keeps the vault's error
//! - **Vault abstraction**: [`CredentialVault`] injected at construction, with
//!   native backends for Windows, macOS and Linux plus an in-memory vault
//! - **Async adapter** (`tokio` feature): [`AsyncSecretStore`]
//! - **Tracing** (`tracing` feature): spans for every typed operation
//!
//! # Example
//!
//! ```
//! use securestore_lib::{InMemoryVault, SecretStore};
//!
//! let store = SecretStore::with_resource(InMemoryVault::new(), "com.example.app").unwrap();
//!
//! assert!(store.set("api_token", "abc123"));
//! assert_eq!(store.get("api_token", "none"), "abc123");
//! assert!(store.delete("api_token"));
//! assert_eq!(store.get("api_token", "none"), "none");
//! assert!(!store.delete("api_token"));
//! ```

pub mod config;
pub mod errors;
pub mod prelude;
pub mod store;
pub mod vault;

#[cfg(feature = "tokio")]
pub mod async_store;

pub use config::StoreConfig;
pub use errors::{SecretStoreError, SecretStoreErrorCode, VaultOperation};
pub use store::SecretStore;
pub use vault::{
    boxed_native_vault, CredentialVault, InMemoryVault, VaultEntry, VaultError, VaultResult,
};

#[cfg(feature = "tokio")]
pub use async_store::AsyncSecretStore;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use vault::{native_vault, NativeVault};

/// Common result alias for secret store operations.
pub type Result<T> = std::result::Result<T, SecretStoreError>;
