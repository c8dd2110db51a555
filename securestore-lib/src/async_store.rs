//! Async adapter for the secret store.
//!
//! Native vault calls block: the Keychain and the Secret Service may show an
//! unlock prompt and wait for the user. [`AsyncSecretStore`] moves every call
//! onto tokio's blocking pool so async callers never stall a worker thread.

use std::sync::Arc;

use crate::errors::SecretStoreError;
use crate::store::{swallow, SecretStore};
use crate::vault::CredentialVault;
use crate::Result;

/// Async wrapper around a shared [`SecretStore`].
pub struct AsyncSecretStore<V> {
    inner: Arc<SecretStore<V>>,
}

impl<V> Clone for AsyncSecretStore<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: CredentialVault + 'static> AsyncSecretStore<V> {
    /// Wrap a store.
    pub fn new(store: SecretStore<V>) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// The wrapped store, for synchronous use.
    pub fn blocking(&self) -> &SecretStore<V> {
        &self.inner
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SecretStore<V>) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| SecretStoreError::Internal(format!("vault task failed: {}", e)))?
    }

    /// See [`SecretStore::get`].
    pub async fn get(&self, key: &str, default_value: &str) -> String {
        swallow("get", self.try_get(key).await, None)
            .unwrap_or_else(|| default_value.to_string())
    }

    /// See [`SecretStore::set`].
    pub async fn set(&self, key: &str, value: &str) -> bool {
        swallow("set", self.try_set(key, value).await.map(|()| true), false)
    }

    /// See [`SecretStore::delete`].
    pub async fn delete(&self, key: &str) -> bool {
        swallow("delete", self.try_delete(key).await, false)
    }

    /// See [`SecretStore::has`].
    pub async fn has(&self, key: &str) -> bool {
        swallow("has", self.try_has(key).await, false)
    }

    /// See [`SecretStore::try_get`].
    pub async fn try_get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_owned();
        self.run(move |store| store.try_get(&key)).await
    }

    /// See [`SecretStore::try_set`].
    pub async fn try_set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_owned();
        let value = zeroize::Zeroizing::new(value.to_owned());
        self.run(move |store| store.try_set(&key, &value)).await
    }

    /// See [`SecretStore::try_delete`].
    pub async fn try_delete(&self, key: &str) -> Result<bool> {
        let key = key.to_owned();
        self.run(move |store| store.try_delete(&key)).await
    }

    /// See [`SecretStore::try_has`].
    pub async fn try_has(&self, key: &str) -> Result<bool> {
        let key = key.to_owned();
        self.run(move |store| store.try_has(&key)).await
    }

    /// See [`SecretStore::keys`].
    pub async fn keys(&self) -> Result<Vec<String>> {
        self.run(|store| store.keys()).await
    }
}
