//! Credential vault abstraction and backends.
//!
//! The store delegates all durable state to a [`CredentialVault`]: an
//! OS-owned collection of named credentials scoped per application. This
//! module provides:
//! - In-memory vault (for testing, all targets)
//! - Windows Credential Locker (`PasswordVault`, via the windows crate)
//! - macOS Keychain (via security-framework)
//! - Linux Secret Service (via secret-service)
//!
//! Only the backend for the compile target is built. [`NativeVault`] names
//! it and [`native_vault`] constructs it. [`boxed_native_vault`] builds on every
//! target and reports `Unsupported` where there is no backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use securestore_lib::vault::{CredentialVault, VaultEntry, native_vault};
//!
//! let vault = native_vault();
//! vault.add(&VaultEntry::new("com.example.app", "api_token", "abc123"))?;
//! let entry = vault.find("com.example.app", "api_token")?;
//! ```
//!
//! ## Security Considerations
//!
//! - Encryption at rest is the platform vault's job
//! - Secret values are zeroized from memory when entries are dropped
//! - Values are never logged or included in `Debug` output

mod memory;
mod traits;

#[cfg(target_os = "windows")]
mod locker;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "linux")]
mod linux;

use crate::errors::SecretStoreError;

pub use memory::InMemoryVault;
pub use traits::{CredentialVault, VaultEntry, VaultError, VaultResult};

#[cfg(target_os = "windows")]
pub use locker::PasswordVaultBackend;

#[cfg(target_os = "macos")]
pub use macos::KeychainVault;

#[cfg(target_os = "linux")]
pub use linux::SecretServiceVault;

/// The OS-native vault for the compile target.
#[cfg(target_os = "windows")]
pub type NativeVault = PasswordVaultBackend;

/// The OS-native vault for the compile target.
#[cfg(target_os = "macos")]
pub type NativeVault = KeychainVault;

/// The OS-native vault for the compile target.
#[cfg(target_os = "linux")]
pub type NativeVault = SecretServiceVault;

/// Construct the OS-native vault for the compile target.
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub fn native_vault() -> NativeVault {
    NativeVault::new()
}

/// The OS-native vault behind a trait object.
///
/// # Errors
/// `Unsupported` on targets without a native backend.
pub fn boxed_native_vault() -> Result<Box<dyn CredentialVault>, SecretStoreError> {
    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        Ok(Box::new(native_vault()))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(SecretStoreError::Unsupported(format!(
            "no native credential vault on {}",
            std::env::consts::OS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    fn test_boxed_native_vault_matches_target() {
        let vault = boxed_native_vault().unwrap();
        assert_eq!(vault.backend_name(), native_vault().backend_name());
    }

    #[test]
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    fn test_boxed_native_vault_unsupported() {
        use crate::errors::SecretStoreErrorCode;

        let err = boxed_native_vault().unwrap_err();
        assert_eq!(err.code(), SecretStoreErrorCode::Unsupported);
    }
}
