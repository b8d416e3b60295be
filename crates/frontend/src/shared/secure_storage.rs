//! Sealed key/value storage on top of `localStorage`.
//!
//! Values are serialised to JSON, XOR-ed with a SHA-256 keystream derived
//! from the configured secret and the item key, and stored as base64. This
//! keeps tokens out of plain sight in dev tools; the secret ships with the
//! bundle, so it is not a substitute for server-side session security.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

const SEAL_PREFIX: &str = "v1:";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Backend(String),
    #[error("stored value is corrupt: {0}")]
    Corrupt(String),
}

/// Minimal string store; `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct SecureStorage<S = BrowserStorage> {
    store: S,
    secret: String,
}

impl SecureStorage<BrowserStorage> {
    pub fn browser(secret: &str) -> Self {
        Self::new(BrowserStorage, secret)
    }
}

impl<S: KeyValueStore> SecureStorage<S> {
    pub fn new(store: S, secret: &str) -> Self {
        Self {
            store,
            secret: secret.to_string(),
        }
    }

    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_vec(value).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let sealed = seal(&self.secret, key, &json);
        self.store.set(key, &sealed)
    }

    /// Reads and opens a sealed value. A value that cannot be opened is
    /// removed and reported as [`StorageError::Corrupt`].
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(sealed) = self.store.get(key)? else {
            return Ok(None);
        };
        let opened = open(&self.secret, key, &sealed).and_then(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt(e.to_string()))
        });
        match opened {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Dropping unreadable storage item '{}': {}", key, e);
                self.store.remove(key)?;
                Err(e)
            }
        }
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn keystream(secret: &str, key: &str, len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut counter: u32 = 0;
    while out.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hasher.update([0u8]);
        hasher.update(key.as_bytes());
        hasher.update(counter.to_be_bytes());
        out.extend_from_slice(&hasher.finalize());
        counter += 1;
    }
    out.truncate(len);
    out
}

fn xor(secret: &str, key: &str, data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(keystream(secret, key, data.len()))
        .map(|(b, k)| b ^ k)
        .collect()
}

pub fn seal(secret: &str, key: &str, plain: &[u8]) -> String {
    format!("{}{}", SEAL_PREFIX, STANDARD.encode(xor(secret, key, plain)))
}

pub fn open(secret: &str, key: &str, sealed: &str) -> Result<Vec<u8>, StorageError> {
    let encoded = sealed
        .strip_prefix(SEAL_PREFIX)
        .ok_or_else(|| StorageError::Corrupt("unknown format".to_string()))?;
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Ok(xor(secret, key, &bytes))
}

#[cfg(test)]
pub mod testing {
    use super::{KeyValueStore, StorageError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Shared in-memory store; clones see the same entries.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        items: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn raw(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.items.borrow_mut().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;

    #[test]
    fn test_sealed_value_round_trips_and_hides_plaintext() {
        let storage = SecureStorage::new(MemoryStorage::default(), "secret");
        storage.set_item("session", &"jwt-token-value").unwrap();

        let raw = storage.store().raw("session").unwrap();
        assert!(raw.starts_with("v1:"));
        assert!(!raw.contains("jwt-token-value"));

        let value: Option<String> = storage.get_item("session").unwrap();
        assert_eq!(value.as_deref(), Some("jwt-token-value"));
    }

    #[test]
    fn test_wrong_secret_is_corrupt_and_removed() {
        let mem = MemoryStorage::default();
        SecureStorage::new(mem.clone(), "one")
            .set_item("session", &vec![1, 2, 3])
            .unwrap();

        let other = SecureStorage::new(mem.clone(), "two");
        let result: Result<Option<Vec<i32>>, _> = other.get_item("session");
        assert!(matches!(result, Err(StorageError::Corrupt(_))));
        assert_eq!(mem.raw("session"), None);
    }

    #[test]
    fn test_missing_and_unsealed_values() {
        let mem = MemoryStorage::default();
        let storage = SecureStorage::new(mem.clone(), "secret");
        let missing: Option<String> = storage.get_item("nothing").unwrap();
        assert_eq!(missing, None);

        mem.set("legacy", "plain-token").unwrap();
        let legacy: Result<Option<String>, _> = storage.get_item("legacy");
        assert!(legacy.is_err());
        assert_eq!(mem.raw("legacy"), None);
    }

    #[test]
    fn test_keystream_depends_on_key() {
        assert_ne!(seal("s", "a", b"same"), seal("s", "b", b"same"));
        assert_eq!(open("s", "a", &seal("s", "a", b"same")).unwrap(), b"same");
        assert_eq!(keystream("s", "a", 70).len(), 70);
    }
}
