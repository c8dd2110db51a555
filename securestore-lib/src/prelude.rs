//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use securestore_lib::prelude::*;
//! ```

// Facade
pub use crate::{SecretStore, StoreConfig};

// Error handling
pub use crate::errors::{SecretStoreError, SecretStoreErrorCode, VaultOperation};
pub use crate::Result;

// Vaults
pub use crate::vault::{boxed_native_vault, CredentialVault, InMemoryVault, VaultEntry, VaultError};

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use crate::vault::{native_vault, NativeVault};

#[cfg(feature = "tokio")]
pub use crate::AsyncSecretStore;
