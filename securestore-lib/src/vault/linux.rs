//! Linux Secret Service vault backend.
//!
//! Talks to the freedesktop Secret Service (GNOME Keyring, KWallet) over
//! D-Bus using the blocking API of the `secret-service` crate. Items live in
//! the default collection and carry two lookup attributes: `resource` (the
//! application scope) and `key`.
//!
//! Every call opens its own session. Sessions are cheap compared to the
//! unlock prompt the daemon may show, and it keeps the backend free of
//! shared D-Bus state.

use std::collections::HashMap;

use secret_service::blocking::SecretService;
use secret_service::{EncryptionType, Error as SecretServiceError};

use super::traits::{CredentialVault, VaultEntry, VaultError, VaultResult};

const ATTR_RESOURCE: &str = "resource";
const ATTR_KEY: &str = "key";
const CONTENT_TYPE: &str = "text/plain";

/// Secret Service backed vault.
#[derive(Debug, Default)]
pub struct SecretServiceVault {
    _private: (),
}

impl SecretServiceVault {
    /// Create a new Secret Service backend.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

fn map_error(err: SecretServiceError) -> VaultError {
    match err {
        SecretServiceError::Locked => VaultError::Locked,
        SecretServiceError::NoResult => VaultError::NotFound,
        SecretServiceError::Prompt => {
            VaultError::AccessDenied("unlock prompt was dismissed".to_string())
        }
        SecretServiceError::Unavailable => {
            VaultError::Unavailable("no Secret Service provider on the session bus".to_string())
        }
        other => VaultError::Platform(other.to_string()),
    }
}

fn connect_error(err: SecretServiceError) -> VaultError {
    VaultError::Unavailable(format!("Secret Service connection failed: {}", err))
}

fn decode(resource: &str, key: &str, data: Vec<u8>) -> VaultResult<VaultEntry> {
    let value = String::from_utf8(data)
        .map_err(|_| VaultError::Platform(format!("secret {} is not UTF-8", key)))?;
    Ok(VaultEntry::new(resource, key, value))
}

impl CredentialVault for SecretServiceVault {
    fn add(&self, entry: &VaultEntry) -> VaultResult<()> {
        let ss = SecretService::connect(EncryptionType::Dh).map_err(connect_error)?;
        let collection = ss.get_default_collection().map_err(map_error)?;
        if collection.is_locked().map_err(map_error)? {
            collection.unlock().map_err(map_error)?;
        }

        let mut attributes: HashMap<&str, &str> = HashMap::new();
        attributes.insert(ATTR_RESOURCE, entry.resource());
        attributes.insert(ATTR_KEY, entry.key());

        let label = format!("{}.{}", entry.resource(), entry.key());
        collection
            .create_item(
                &label,
                attributes,
                entry.value().as_bytes(),
                false,
                CONTENT_TYPE,
            )
            .map_err(map_error)?;

        Ok(())
    }

    fn remove(&self, entry: &VaultEntry) -> VaultResult<()> {
        let ss = SecretService::connect(EncryptionType::Dh).map_err(connect_error)?;
        let collection = ss.get_default_collection().map_err(map_error)?;
        if collection.is_locked().map_err(map_error)? {
            collection.unlock().map_err(map_error)?;
        }

        let mut attributes: HashMap<&str, &str> = HashMap::new();
        attributes.insert(ATTR_RESOURCE, entry.resource());
        attributes.insert(ATTR_KEY, entry.key());

        let items = collection.search_items(attributes).map_err(map_error)?;
        match items.first() {
            Some(item) => item.delete().map_err(map_error),
            None => Err(VaultError::NotFound),
        }
    }

    fn retrieve_all(&self, resource: &str) -> VaultResult<Vec<VaultEntry>> {
        let ss = SecretService::connect(EncryptionType::Dh).map_err(connect_error)?;
        let collection = ss.get_default_collection().map_err(map_error)?;
        if collection.is_locked().map_err(map_error)? {
            collection.unlock().map_err(map_error)?;
        }

        let mut attributes: HashMap<&str, &str> = HashMap::new();
        attributes.insert(ATTR_RESOURCE, resource);

        let items = collection.search_items(attributes).map_err(map_error)?;
        let mut entries = Vec::with_capacity(items.len());
        for item in &items {
            if item.is_locked().map_err(map_error)? {
                item.unlock().map_err(map_error)?;
            }
            let item_attributes = item.get_attributes().map_err(map_error)?;
            let Some(key) = item_attributes.get(ATTR_KEY) else {
                continue;
            };
            let secret = item.get_secret().map_err(map_error)?;
            entries.push(decode(resource, key, secret)?);
        }
        Ok(entries)
    }

    fn find(&self, resource: &str, key: &str) -> VaultResult<Option<VaultEntry>> {
        let ss = SecretService::connect(EncryptionType::Dh).map_err(connect_error)?;
        let collection = ss.get_default_collection().map_err(map_error)?;
        if collection.is_locked().map_err(map_error)? {
            collection.unlock().map_err(map_error)?;
        }

        let mut attributes: HashMap<&str, &str> = HashMap::new();
        attributes.insert(ATTR_RESOURCE, resource);
        attributes.insert(ATTR_KEY, key);

        let items = collection.search_items(attributes).map_err(map_error)?;
        let Some(item) = items.first() else {
            return Ok(None);
        };
        if item.is_locked().map_err(map_error)? {
            item.unlock().map_err(map_error)?;
        }
        let secret = item.get_secret().map_err(map_error)?;
        decode(resource, key, secret).map(Some)
    }

    fn backend_name(&self) -> &'static str {
        "linux-secret-service"
    }
}
