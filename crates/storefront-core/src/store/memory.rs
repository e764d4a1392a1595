//! In-memory key-value store
//!
//! Suitable for tests and for sessions that should leave nothing behind.

use dashmap::DashMap;
use tracing::trace;

use super::KeyValueStore;
use crate::error::StoreError;

/// In-memory implementation of [`KeyValueStore`]
///
/// Uses `DashMap` so one instance can be shared between controllers
/// (and between "sessions" in restart tests) without extra locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `pairs`
    pub fn with_values<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in pairs {
            store.values.insert(key.into(), value.into());
        }
        store
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        trace!(key, bytes = value.len(), "memory store write");
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("app-theme").is_none());

        store.set("app-theme", "theme2").unwrap();
        assert_eq!(store.get("app-theme").as_deref(), Some("theme2"));

        store.set("app-theme", "theme3").unwrap();
        assert_eq!(store.get("app-theme").as_deref(), Some("theme3"));
        assert_eq!(store.len(), 1);

        store.remove("app-theme").unwrap();
        assert!(store.is_empty());
        // removing twice is fine
        store.remove("app-theme").unwrap();
    }

    #[test]
    fn test_with_values() {
        let store = MemoryStore::with_values([("cart", "[]"), ("app-theme", "theme1")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("cart").as_deref(), Some("[]"));
    }
}
