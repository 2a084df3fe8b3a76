//! Storage layer for the marketing assistant
//!
//! This crate provides file and key-value persistence and the saved
//! strategy stores built on them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod persistence;
pub mod strategies;

pub use kv::{KvConfig, KvError, KvStore};
pub use persistence::{PersistedState, PersistenceConfig, PersistenceError};
pub use strategies::{
    FileStrategyStore, KvStrategyStore, MemoryStrategyStore, StoreError, StrategyStore,
    SAVED_STRATEGIES_KEY,
};
