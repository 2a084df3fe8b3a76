//! Key-value store for application documents
//!
//! A small typed wrapper over sled: values are stored as JSON under string
//! keys.

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database directory
    pub path: PathBuf,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None flushes only on request)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("marketing_kv.db"),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open a store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory store
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn checked(key: &str) -> Result<&[u8]> {
        if key.is_empty() {
            return Err(KvError::InvalidKey("key must not be empty".to_string()));
        }
        Ok(key.as_bytes())
    }

    /// Get a value by key
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(Self::checked(key)?)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value by key
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(Self::checked(key)?, bytes)?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_get_set() {
        let store = KvStore::in_memory().unwrap();
        let entry = Entry {
            name: "vay tiền".to_string(),
            count: 2,
        };

        assert_eq!(store.get::<Entry>("entry").unwrap(), None);

        store.set("entry", &entry).unwrap();
        assert_eq!(store.get::<Entry>("entry").unwrap(), Some(entry));

        store.set("entry", &Entry { name: "trả góp".to_string(), count: 3 }).unwrap();
        assert_eq!(store.get::<Entry>("entry").unwrap().map(|e| e.count), Some(3));
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = KvStore::in_memory().unwrap();
        assert!(matches!(
            store.set("", &1u32),
            Err(KvError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_wrong_type_is_serialization_error() {
        let store = KvStore::in_memory().unwrap();
        store.set("n", &"text").unwrap();

        assert!(matches!(
            store.get::<u32>("n"),
            Err(KvError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let config = KvConfig::new(dir.path().join("kv")).flush_every_ms(None);

        {
            let store = KvStore::new(config.clone()).unwrap();
            store.set("greeting", &"xin chào").unwrap();
            store.flush().await.unwrap();
        }

        let store = KvStore::new(config).unwrap();
        assert_eq!(
            store.get::<String>("greeting").unwrap().as_deref(),
            Some("xin chào")
        );
    }
}
