//! Windows credential vault backend.
//!
//! Uses the WinRT `Windows.Security.Credentials.PasswordVault` (the Credential
//! Locker) through the `windows` crate. Entries are `PasswordCredential`s with
//! `Resource` = application scope and `UserName` = key.
//!
//! The Credential Locker already offers a point lookup (`Retrieve`) and a
//! per-resource enumeration (`FindAllByResource`), so this backend never scans
//! the whole locker.

use windows::core::{HRESULT, HSTRING};
use windows::Security::Credentials::{PasswordCredential, PasswordVault};

use super::traits::{CredentialVault, VaultEntry, VaultError, VaultResult};

/// `HRESULT_FROM_WIN32(ERROR_NOT_FOUND)`, raised when no credential matches.
const E_ELEMENT_NOT_FOUND: HRESULT = HRESULT(0x8007_0490_u32 as i32);
const E_ACCESSDENIED: HRESULT = HRESULT(0x8007_0005_u32 as i32);
const E_INVALIDARG: HRESULT = HRESULT(0x8007_0057_u32 as i32);

/// Credential Locker backed vault.
///
/// A fresh `PasswordVault` handle is opened per call; the locker itself is
/// process-wide and thread-safe.
#[derive(Debug, Default)]
pub struct PasswordVaultBackend {
    _private: (),
}

impl PasswordVaultBackend {
    /// Create a new Credential Locker backend.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn open(&self) -> VaultResult<PasswordVault> {
        PasswordVault::new().map_err(|e| VaultError::Unavailable(e.to_string()))
    }

    fn lookup(
        &self,
        vault: &PasswordVault,
        resource: &str,
        key: &str,
    ) -> VaultResult<Option<PasswordCredential>> {
        match vault.Retrieve(&HSTRING::from(resource), &HSTRING::from(key)) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) if e.code() == E_ELEMENT_NOT_FOUND => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }
}

fn map_error(err: windows::core::Error) -> VaultError {
    match err.code() {
        E_ELEMENT_NOT_FOUND => VaultError::NotFound,
        E_ACCESSDENIED => VaultError::AccessDenied(err.to_string()),
        E_INVALIDARG => VaultError::Rejected(err.to_string()),
        _ => VaultError::Platform(err.to_string()),
    }
}

fn to_entry(credential: &PasswordCredential) -> VaultResult<VaultEntry> {
    // Enumerated credentials come back without their password
    credential.RetrievePassword().map_err(map_error)?;

    let resource = credential.Resource().map_err(map_error)?;
    let key = credential.UserName().map_err(map_error)?;
    let value = credential.Password().map_err(map_error)?;

    Ok(VaultEntry::new(
        resource.to_string_lossy(),
        key.to_string_lossy(),
        value.to_string_lossy(),
    ))
}

impl CredentialVault for PasswordVaultBackend {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        let vault = self.open()?;
        let credential = PasswordCredential::CreatePasswordCredential(
            &HSTRING::from(entry.resource()),
            &HSTRING::from(entry.key()),
            &HSTRING::from(entry.value()),
        )
        .map_err(map_error)?;

        vault.Add(&credential).map_err(map_error)
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        let vault = self.open()?;
        let credential = self
            .lookup(&vault, entry.resource(), entry.key())?
            .ok_or(VaultError::NotFound)?;

        vault.Remove(&credential).map_err(map_error)
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        let vault = self.open()?;
        let credentials = match vault.FindAllByResource(&HSTRING::from(resource)) {
            Ok(credentials) => credentials,
            Err(e) if e.code() == E_ELEMENT_NOT_FOUND => return Ok(Vec::new()),
            Err(e) => return Err(map_error(e)),
        };

        let size = credentials.Size().map_err(map_error)?;
        let mut entries = Vec::with_capacity(size as usize);
        for index in 0..size {
            let credential = credentials.GetAt(index).map_err(map_error)?;
            entries.push(to_entry(&credential)?);
        }
        Ok(entries)
    }

    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        let vault = self.open()?;
        match self.lookup(&vault, resource, key)? {
            Some(credential) => to_entry(&credential).map(Some),
            None => Ok(None),
        }
    }

    fn backend_name(&self) -> &'static str {
        "windows-credential-locker"
    }
}
