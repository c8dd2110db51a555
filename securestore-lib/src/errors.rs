//! Error types for secret store operations.
//!
//! The facade exposes two surfaces: a boolean/default-value surface that never
//! fails, and a typed surface returning [`SecretStoreError`]. Backend failures
//! keep their underlying [`VaultError`] as the error source so callers can
//! diagnose why a vault refused an operation.

use std::fmt;

use crate::vault::VaultError;

/// Error codes for FFI and host application integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SecretStoreErrorCode {
    /// No secret stored under the key
    NotFound = 1000,
    /// Vault denied access (permissions, locked keychain)
    AccessDenied = 2000,
    /// Caller passed a key or value the store refuses
    InvalidInput = 4000,
    /// Vault refused an add, remove or enumeration
    BackendRejected = 5000,
    /// No native vault for this target
    Unsupported = 6000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Vault primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultOperation {
    /// Inserting a new entry.
    Add,
    /// Removing an existing entry.
    Remove,
    /// Enumerating the entries of a scope.
    Enumerate,
    /// Looking up a single entry.
    Lookup,
}

impl VaultOperation {
    /// Get the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Enumerate => "enumerate",
            Self::Lookup => "lookup",
        }
    }
}

impl fmt::Display for VaultOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for secret store operations.
#[derive(Debug)]
pub enum SecretStoreError {
    /// No secret exists for the key.
    NotFound {
        /// Key that was looked up
        key: String,
    },

    /// Input rejected before reaching the vault.
    InvalidInput {
        /// Parameter name ("key", "value", "resource")
        field: &'static str,
        /// Reason for rejection
        reason: String,
    },

    /// The vault refused the operation.
    BackendRejected {
        /// Primitive that failed
        operation: VaultOperation,
        /// Key involved, if the operation targeted one
        key: Option<String>,
        /// Underlying vault error
        source: VaultError,
    },

    /// No native vault is available on this target.
    Unsupported(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl SecretStoreError {
    /// Get the error code for FFI/host integration.
    pub fn code(&self) -> SecretStoreErrorCode {
        match self {
            Self::NotFound { .. } => SecretStoreErrorCode::NotFound,
            Self::InvalidInput { .. } => SecretStoreErrorCode::InvalidInput,
            Self::BackendRejected {
                source: VaultError::AccessDenied(_) | VaultError::Locked,
                ..
            } => SecretStoreErrorCode::AccessDenied,
            Self::BackendRejected { .. } => SecretStoreErrorCode::BackendRejected,
            Self::Unsupported(_) => SecretStoreErrorCode::Unsupported,
            Self::Internal(_) => SecretStoreErrorCode::Internal,
        }
    }

    /// Create a "not found" error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an invalid input error.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Wrap a vault failure for an operation on `key`.
    pub fn backend(operation: VaultOperation, key: Option<&str>, source: VaultError) -> Self {
        Self::BackendRejected {
            operation,
            key: key.map(str::to_owned),
            source,
        }
    }

    /// Check if this error indicates the key wasn't found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the vault wants the user to authenticate or unlock first.
    pub fn requires_auth(&self) -> bool {
        self.code() == SecretStoreErrorCode::AccessDenied
    }

    /// Get the underlying vault error, if any.
    pub fn vault_error(&self) -> Option<&VaultError> {
        match self {
            Self::BackendRejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for SecretStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "secret not found: {}", key),
            Self::InvalidInput { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::BackendRejected {
                operation,
                key: Some(key),
                source,
            } => write!(f, "vault {} failed for {}: {}", operation, key, source),
            Self::BackendRejected {
                operation,
                key: None,
                source,
            } => write!(f, "vault {} failed: {}", operation, source),
            Self::Unsupported(what) => write!(f, "not supported: {}", what),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for SecretStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BackendRejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SecretStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input("config", err.to_string())
    }
}
