//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use securestore_lib::{
    boxed_native_vault, CredentialVault, InMemoryVault, SecretStore, StoreConfig,
};

pub mod info;
pub mod secret;

/// Scope used when neither a config file nor `--resource` names one.
pub const DEFAULT_RESOURCE: &str = "securestore-demo";

/// Store type every command works with.
pub type DemoStore = SecretStore<Box<dyn CredentialVault>>;

/// Default config file location, `<config_dir>/securestore-demo/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("securestore-demo").join("config.json"))
}

/// Resolve the store configuration.
///
/// An explicit `--config` must exist. The default config file is used when
/// present. `resource` overrides whatever scope the file names.
pub fn load_config(path: Option<&Path>, resource: Option<&str>) -> Result<StoreConfig> {
    let from_file = match path {
        Some(path) => Some(read_config(path)?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(read_config(&path)?),
            _ => None,
        },
    };

    let mut config = from_file.unwrap_or_else(|| StoreConfig::new(DEFAULT_RESOURCE));
    if let Some(resource) = resource {
        config.resource = resource.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<StoreConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    StoreConfig::from_json(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Open a store over the OS vault, or over an in-memory vault with `memory`.
pub fn open_store(config: StoreConfig, memory: bool) -> Result<DemoStore> {
    let vault: Box<dyn CredentialVault> = if memory {
        Box::new(InMemoryVault::new())
    } else {
        boxed_native_vault().context("Use --memory to run without an OS vault")?
    };
    Ok(SecretStore::new(vault, config)?)
}
