//! Application configuration
//!
//! Settings come from the process environment. Only the API key is required.

use app_state::Shell;
use marketing_core::genai_client::{GenAiClient, GenAiClientConfig, GenAiError};
use marketing_core::GeminiGateway;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use storage::{
    FileStrategyStore, KvConfig, KvError, KvStore, KvStrategyStore, MemoryStrategyStore,
    StrategyStore,
};
use thiserror::Error;

/// Primary API key variable
pub const API_KEY_VAR: &str = "API_KEY";
/// Fallback API key variable
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Model override
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Endpoint override
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
/// Request timeout in seconds
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";
/// Directory for persisted data
pub const DATA_DIR_VAR: &str = "MARKETING_DATA_DIR";
/// Saved strategy backend (`file`, `kv` or `memory`)
pub const STORE_VAR: &str = "MARKETING_STORE";

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = ".marketing-compass";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key is set
    #[error("API_KEY environment variable not set")]
    MissingApiKey,

    /// A variable has an unusable value
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to create generation client: {0}")]
    Client(#[from] GenAiError),

    /// The data directory could not be prepared
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The key-value store could not be opened
    #[error("Key-value store error: {0}")]
    Kv(#[from] KvError),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Where saved strategies live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Checksummed JSON document
    #[default]
    File,
    /// Embedded key-value database
    Kv,
    /// Process memory; nothing survives a restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "kv" | "sled" => Ok(StoreBackend::Kv),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                var: STORE_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generation client settings
    pub client: GenAiClientConfig,
    /// Directory for persisted data
    pub data_dir: PathBuf,
    /// Saved strategy backend
    pub store: StoreBackend,
}

impl AppConfig {
    /// Create a configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: GenAiClientConfig::new(api_key),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store: StoreBackend::default(),
        }
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the saved strategy backend
    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .or_else(|| get(GEMINI_API_KEY_VAR))
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key.trim());

        if let Some(model) = get(MODEL_VAR) {
            config.client = config.client.with_model(model.trim());
        }
        if let Some(base_url) = get(BASE_URL_VAR) {
            config.client = config.client.with_base_url(base_url.trim());
        }
        if let Some(secs) = get(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: TIMEOUT_VAR,
                value: secs.clone(),
            })?;
            config.client = config.client.with_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = get(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(store) = get(STORE_VAR) {
            config.store = store.parse()?;
        }

        Ok(config)
    }

    /// Open the configured saved strategy store
    pub async fn open_store(&self) -> Result<Arc<dyn StrategyStore>> {
        Ok(match self.store {
            StoreBackend::File => {
                tokio::fs::create_dir_all(&self.data_dir).await?;
                Arc::new(FileStrategyStore::in_dir(&self.data_dir))
            }
            StoreBackend::Kv => {
                tokio::fs::create_dir_all(&self.data_dir).await?;
                let kv = KvStore::new(KvConfig::new(self.data_dir.join("kv")))?;
                Arc::new(KvStrategyStore::new(kv))
            }
            StoreBackend::Memory => Arc::new(MemoryStrategyStore::new()),
        })
    }

    /// Wire client, gateway and store into a started shell
    pub async fn build_shell(&self) -> Result<Arc<Shell>> {
        let client = GenAiClient::new(self.client.clone())?;
        tracing::info!(model = client.model(), store = ?self.store, "starting shell");

        let gateway = Arc::new(GeminiGateway::new(client));
        let store = self.open_store().await?;
        Ok(Arc::new(Shell::start(gateway, store).await))
    }
}
