//! Key-Value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KvStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap; clones share the
/// same underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn with_store(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open a process-local cache. Nothing survives the process.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = artisan_cache::Cache::in_memory();
    /// cache.set("greeting", &"hello").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Open a durable cache rooted at a directory, creating it if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".artisan/storage")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::with_store(FileStore::open(dir)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes no longer parse as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("cart:default")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)?;
        tracing::trace!(key, bytes = bytes.len(), "cache write");
        Ok(())
    }

    /// Read the raw stored bytes without deserializing.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Store raw bytes without serializing.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store.set(key, bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)?;
        tracing::trace!(key, "cache delete");
        Ok(())
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let session = "default";
/// let key = artisan_cache::cache_key!("cart", session);
/// assert_eq!(key, "cart:default");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Line {
        id: u64,
        qty: i64,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::in_memory();
        let lines = vec![Line { id: 1, qty: 2 }, Line { id: 5, qty: 1 }];
        cache.set("cart:default", &lines).unwrap();

        let loaded: Vec<Line> = cache.get("cart:default").unwrap().unwrap();
        assert_eq!(loaded, lines);
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        assert!(cache.get::<Vec<Line>>("nope").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_payload_reports_serialize_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart:default", b"{not json").unwrap();

        let err = cache.get::<Vec<Line>>("cart:default").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_clones_share_store() {
        let a = Cache::in_memory();
        let b = a.clone();
        a.set("k", &1u32).unwrap();
        assert_eq!(b.get::<u32>("k").unwrap(), Some(1));
        b.delete("k").unwrap();
        assert!(!a.exists("k").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        let id = 42u64;
        assert_eq!(cache_key!("cart", "user", id), "cart:user:42");
    }
}
