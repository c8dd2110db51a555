//! macOS Keychain vault backend.
//!
//! Stores generic passwords via the `security-framework` crate with
//! service = application scope and account = key.

use security_framework::base::Error as SecurityError;
use security_framework::item::{ItemClass, ItemSearchOptions, Limit};
use security_framework::passwords::{
    delete_generic_password, get_generic_password, set_generic_password,
};

use super::traits::{CredentialVault, VaultEntry, VaultError, VaultResult};

const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;
const ERR_SEC_AUTH_FAILED: i32 = -25293;
const ERR_SEC_INTERACTION_NOT_ALLOWED: i32 = -25308;
const ERR_SEC_USER_CANCELED: i32 = -128;

/// Keychain backed vault.
#[derive(Debug, Default)]
pub struct KeychainVault {
    _private: (),
}

impl KeychainVault {
    /// Create a new Keychain backend.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

fn map_error(err: SecurityError) -> VaultError {
    match err.code() {
        ERR_SEC_ITEM_NOT_FOUND => VaultError::NotFound,
        ERR_SEC_INTERACTION_NOT_ALLOWED => VaultError::Locked,
        ERR_SEC_AUTH_FAILED | ERR_SEC_USER_CANCELED => VaultError::AccessDenied(err.to_string()),
        _ => VaultError::Platform(err.to_string()),
    }
}

fn decode(resource: &str, key: &str, data: Vec<u8>) -> VaultResult<VaultEntry> {
    let value = String::from_utf8(data)
        .map_err(|_| VaultError::Platform(format!("keychain item {} is not UTF-8", key)))?;
    Ok(VaultEntry::new(resource, key, value))
}

impl CredentialVault for KeychainVault {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        set_generic_password(entry.resource(), entry.key(), entry.value().as_bytes())
            .map_err(map_error)
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        delete_generic_password(entry.resource(), entry.key()).map_err(map_error)
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        let results = match ItemSearchOptions::new()
            .class(ItemClass::generic_password())
            .service(resource)
            .load_attributes(true)
            .limit(Limit::All)
            .search()
        {
            Ok(results) => results,
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => return Ok(Vec::new()),
            Err(e) => return Err(map_error(e)),
        };

        let mut entries = Vec::with_capacity(results.len());
        for result in results {
            let Some(account) = result
                .simplify_dict()
                .and_then(|attrs| attrs.get("acct").cloned())
            else {
                continue;
            };
            // Attribute searches don't return the secret itself
            match get_generic_password(resource, &account) {
                Ok(data) => entries.push(decode(resource, &account, data)?),
                Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => continue,
                Err(e) => return Err(map_error(e)),
            }
        }
        Ok(entries)
    }

    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        match get_generic_password(resource, key) {
            Ok(data) => decode(resource, key, data).map(Some),
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "macos-keychain"
    }
}
