//! Secret storage consulted by the keystore handler.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Errors raised by a [`SecretStore`].
#[derive(Debug, thiserror::Error)]
pub enum KeystoreError {
    /// Keys must start with a letter or `_` and contain only ASCII
    /// alphanumerics and `_`.
    #[error("invalid keystore key '{0}'")]
    InvalidKey(String),

    #[error("key '{0}' already exists in the keystore")]
    KeyAlreadyExists(String),

    /// The backing store could not be read.
    #[error("keystore unavailable: {0}")]
    Unavailable(String),
}

/// Read access to stored secrets.
pub trait SecretStore: Send + Sync {
    /// Returns the secret stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, KeystoreError>;

    fn has_key(&self, key: &str) -> Result<bool, KeystoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Returns all stored keys in insertion order.
    fn keys(&self) -> Result<Vec<String>, KeystoreError>;
}

/// Returns true if `key` is a valid keystore key.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// An in-memory [`SecretStore`]. Clones share the same secrets.
///
/// ```rust
/// use hardhat_schema::keystore::{MemoryKeystore, SecretStore};
///
/// let keystore = MemoryKeystore::new();
/// keystore.set("MAINNET_RPC", "https://rpc.example.com", false).unwrap();
///
/// assert_eq!(keystore.get("MAINNET_RPC").unwrap().as_deref(), Some("https://rpc.example.com"));
/// assert!(keystore.set("MAINNET_RPC", "other", false).is_err());
/// ```
#[derive(Clone, Default)]
pub struct MemoryKeystore {
    secrets: Arc<RwLock<IndexMap<String, String>>>,
}

impl MemoryKeystore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`. Existing keys are only replaced when
    /// `force` is set.
    ///
    /// # Errors
    ///
    /// Returns `KeystoreError::InvalidKey` for a malformed key and
    /// `KeystoreError::KeyAlreadyExists` when the key is taken and `force`
    /// is false.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        force: bool,
    ) -> Result<(), KeystoreError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(KeystoreError::InvalidKey(key));
        }

        let mut secrets = self.secrets.write();
        if !force && secrets.contains_key(&key) {
            return Err(KeystoreError::KeyAlreadyExists(key));
        }
        secrets.insert(key, value.into());
        Ok(())
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.secrets.write().shift_remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }
}

impl SecretStore for MemoryKeystore {
    fn get(&self, key: &str) -> Result<Option<String>, KeystoreError> {
        Ok(self.secrets.read().get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<String>, KeystoreError> {
        Ok(self.secrets.read().keys().cloned().collect())
    }
}
