//! Secret commands

use anyhow::{Context, Result};

use super::DemoStore;
use crate::ui;

/// Print the secret under `key`.
///
/// With a default the never-failing lookup is used. Without one an absent
/// key is an error.
pub fn get(store: &DemoStore, key: &str, default: Option<&str>) -> Result<()> {
    let value = match default {
        Some(default) => store.get(key, default),
        None => store.require(key)?,
    };
    println!("{}", value);
    Ok(())
}

#[tracing::instrument(skip(store, value))]
pub fn set(store: &DemoStore, key: &str, value: Option<String>) -> Result<()> {
    let value = match value {
        Some(value) => value,
        None => rpassword::prompt_password(format!("Secret value for '{}': ", key))
            .context("Failed to read secret value")?,
    };

    store
        .try_set(key, &value)
        .with_context(|| format!("Failed to store '{}'", key))?;

    ui::success(&format!("Stored '{}' in {}", key, store.resource()));
    Ok(())
}

#[tracing::instrument(skip(store))]
pub fn delete(store: &DemoStore, key: &str) -> Result<()> {
    if store.try_delete(key)? {
        ui::success(&format!("Deleted '{}'", key));
    } else {
        ui::warning(&format!("No secret stored under '{}'", key));
    }
    Ok(())
}

pub fn has(store: &DemoStore, key: &str) -> Result<()> {
    let present = store.try_has(key)?;
    println!("{}", present);
    Ok(())
}

pub fn list(store: &DemoStore) -> Result<()> {
    let keys = store.keys()?;

    ui::header(&format!("Secrets in {}", store.resource()));
    if keys.is_empty() {
        ui::info("No secrets stored");
        return Ok(());
    }
    for key in &keys {
        println!("  {}", key);
    }
    Ok(())
}

#[tracing::instrument(skip(store))]
pub fn clear(store: &DemoStore, yes: bool) -> Result<()> {
    if !yes {
        let prompt = format!("Delete every secret in {}?", store.resource());
        if !ui::confirm(&prompt, false)? {
            ui::info("Cancelled");
            return Ok(());
        }
    }

    let removed = store.clear()?;
    ui::success(&format!("Removed {} secret(s)", removed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use securestore_lib::{CredentialVault, InMemoryVault, SecretStore, StoreConfig};

    fn store() -> DemoStore {
        let vault: Box<dyn CredentialVault> = Box::new(InMemoryVault::new());
        SecretStore::new(vault, StoreConfig::new("cli-test")).unwrap()
    }

    #[test]
    fn test_set_then_delete() {
        let store = store();
        set(&store, "api_token", Some("abc123".to_string())).unwrap();
        assert_eq!(store.get("api_token", ""), "abc123");

        delete(&store, "api_token").unwrap();
        assert!(!store.has("api_token"));

        // Deleting again is a warning, not an error
        delete(&store, "api_token").unwrap();
    }

    #[test]
    fn test_get_without_default_fails_when_absent() {
        let store = store();
        assert!(get(&store, "missing", None).is_err());
        assert!(get(&store, "missing", Some("fallback")).is_ok());
    }

    #[test]
    fn test_set_rejects_empty_key() {
        let store = store();
        let err = set(&store, "", Some("v".to_string())).unwrap_err();
        assert!(format!("{:#}", err).contains("key"));
    }

    #[test]
    fn test_clear_with_yes_skips_prompt() {
        let store = store();
        store.set("a", "1");
        store.set("b", "2");

        clear(&store, true).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
