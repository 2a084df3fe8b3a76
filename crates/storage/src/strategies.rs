//! Saved strategy persistence
//!
//! The saved list is one named entry, read once at startup and rewritten
//! wholesale on every change. [`StrategyStore`] abstracts over where that
//! entry lives.

use async_trait::async_trait;
use marketing_core::SavedStrategy;
use parking_lot::RwLock;
use std::path::PathBuf;
use thiserror::Error;

use crate::kv::{KvError, KvStore};
use crate::persistence::{PersistedState, PersistenceConfig, PersistenceError};

/// Name of the persisted entry
pub const SAVED_STRATEGIES_KEY: &str = "savedStrategies";

/// Strategy store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// File persistence failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Key-value store failed
    #[error(transparent)]
    Kv(#[from] KvError),
}

/// Result type for strategy store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Load-all / save-all capability for the saved strategy list
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Read the whole list; an absent entry is an empty list
    async fn load_all(&self) -> Result<Vec<SavedStrategy>>;

    /// Replace the whole list
    async fn save_all(&self, strategies: &[SavedStrategy]) -> Result<()>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Strategies kept in a checksummed JSON document
pub struct FileStrategyStore {
    state: PersistedState<Vec<SavedStrategy>>,
}

impl FileStrategyStore {
    /// Store the list in `<dir>/savedStrategies.json`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(format!("{}.json", SAVED_STRATEGIES_KEY));
        Self::new(PersistenceConfig::new(path))
    }

    /// Create a store with explicit persistence settings
    pub fn new(config: PersistenceConfig) -> Self {
        Self {
            state: PersistedState::new(config),
        }
    }

    /// Underlying document
    pub fn state(&self) -> &PersistedState<Vec<SavedStrategy>> {
        &self.state
    }
}

#[async_trait]
impl StrategyStore for FileStrategyStore {
    /// An unreadable document falls back to the most recent backup
    async fn load_all(&self) -> Result<Vec<SavedStrategy>> {
        match self.state.load().await {
            Ok(list) => Ok(list),
            Err(e) if e.is_unreadable() => {
                tracing::warn!(
                    path = %self.state.path().display(),
                    error = %e,
                    "saved strategies unreadable, restoring backup"
                );
                match self.state.restore_from_backup(1).await {
                    Ok(list) => Ok(list),
                    Err(restore) => {
                        tracing::warn!(error = %restore, "backup restore failed");
                        Err(e.into())
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save_all(&self, strategies: &[SavedStrategy]) -> Result<()> {
        self.state.store(&strategies.to_vec()).await?;
        Ok(())
    }
}

// =============================================================================
// Key-Value Backend
// =============================================================================

/// Strategies kept under the `savedStrategies` key of a [`KvStore`]
pub struct KvStrategyStore {
    kv: KvStore,
}

impl KvStrategyStore {
    /// Wrap an open key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl StrategyStore for KvStrategyStore {
    async fn load_all(&self) -> Result<Vec<SavedStrategy>> {
        Ok(self
            .kv
            .get::<Vec<SavedStrategy>>(SAVED_STRATEGIES_KEY)?
            .unwrap_or_default())
    }

    async fn save_all(&self, strategies: &[SavedStrategy]) -> Result<()> {
        self.kv.set(SAVED_STRATEGIES_KEY, &strategies)?;
        self.kv.flush().await?;
        Ok(())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Strategies kept in process memory
#[derive(Default)]
pub struct MemoryStrategyStore {
    strategies: RwLock<Vec<SavedStrategy>>,
}

impl MemoryStrategyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `strategies`
    pub fn with_strategies(strategies: Vec<SavedStrategy>) -> Self {
        Self {
            strategies: RwLock::new(strategies),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> Vec<SavedStrategy> {
        self.strategies.read().clone()
    }
}

#[async_trait]
impl StrategyStore for MemoryStrategyStore {
    async fn load_all(&self) -> Result<Vec<SavedStrategy>> {
        Ok(self.snapshot())
    }

    async fn save_all(&self, strategies: &[SavedStrategy]) -> Result<()> {
        *self.strategies.write() = strategies.to_vec();
        Ok(())
    }
}
