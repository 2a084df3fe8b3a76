//! File-backed document persistence
//!
//! A single JSON document is kept on disk inside a versioned envelope that
//! carries an md5 checksum of the payload. Writes go through a temp file and a
//! rename, and the previous documents are kept as rotating backups.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Corruption detected
    #[error("Corruption detected: {0}")]
    Corruption(String),

    /// Version mismatch
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: u32,
        /// Found version
        found: u32,
    },

    /// Requested backup does not exist
    #[error("Backup {0} not found")]
    BackupNotFound(usize),
}

impl PersistenceError {
    /// Whether the document exists but cannot be trusted
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            PersistenceError::Serialization(_)
                | PersistenceError::Corruption(_)
                | PersistenceError::VersionMismatch { .. }
        )
    }
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// On-disk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    checksum: String,
    data: T,
}

fn checksum_of<T: Serialize>(data: &T) -> Result<String> {
    let json = serde_json::to_string(data)?;
    Ok(format!("{:x}", md5::compute(json.as_bytes())))
}

impl<T: Serialize> Envelope<T> {
    fn seal(version: u32, data: T) -> Result<Self> {
        let checksum = checksum_of(&data)?;
        Ok(Self {
            version,
            checksum,
            data,
        })
    }

    fn verify(&self) -> Result<()> {
        let computed = checksum_of(&self.data)?;
        if computed != self.checksum {
            return Err(PersistenceError::Corruption(format!(
                "Checksum mismatch: expected {}, got {}",
                self.checksum, computed
            )));
        }
        Ok(())
    }
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Path to the document
    pub path: PathBuf,
    /// Current document version
    pub version: u32,
    /// Write through a temp file and rename
    pub atomic_writes: bool,
    /// Keep copies of previous documents
    pub auto_backup: bool,
    /// Number of backups to keep
    pub backup_count: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("saved_strategies.json"),
            version: 1,
            atomic_writes: true,
            auto_backup: true,
            backup_count: 3,
        }
    }
}

impl PersistenceConfig {
    /// Create a new configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set document version
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Enable or disable atomic writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Configure backups
    pub fn backups(mut self, enabled: bool, count: usize) -> Self {
        self.auto_backup = enabled;
        self.backup_count = count;
        self
    }
}

/// A JSON document persisted to a single file
///
/// Reads always go to disk; the struct holds no cached copy. Concurrent
/// writes through the same instance are serialized.
pub struct PersistedState<T> {
    config: PersistenceConfig,
    write_lock: Mutex<()>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Create a new persisted document
    pub fn new(config: PersistenceConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
            _marker: std::marker::PhantomData,
        }
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Load the document, or its default if the file does not exist yet
    pub async fn load(&self) -> Result<T> {
        match fs::read_to_string(&self.config.path).await {
            Ok(contents) => self.decode(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the document on disk
    pub async fn store(&self, data: &T) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let envelope = Envelope::seal(self.config.version, data)?;
        let json = serde_json::to_string_pretty(&envelope)?;

        if self.config.auto_backup {
            if let Err(e) = self.rotate_backups().await {
                tracing::warn!(path = %self.config.path.display(), error = %e, "backup rotation failed");
            }
        }

        if self.config.atomic_writes {
            self.write_atomic(&json).await
        } else {
            fs::write(&self.config.path, json).await?;
            Ok(())
        }
    }

    /// Copy backup `n` (1 = most recent) over the document and load it
    pub async fn restore_from_backup(&self, n: usize) -> Result<T> {
        let backup = self.backup_path(n);
        if !fs::try_exists(&backup).await? {
            return Err(PersistenceError::BackupNotFound(n));
        }

        {
            let _guard = self.write_lock.lock().await;
            fs::copy(&backup, &self.config.path).await?;
        }
        self.load().await
    }

    fn decode(&self, contents: &str) -> Result<T> {
        let envelope: Envelope<T> = serde_json::from_str(contents)?;
        envelope.verify()?;

        if envelope.version != self.config.version {
            return Err(PersistenceError::VersionMismatch {
                expected: self.config.version,
                found: envelope.version,
            });
        }

        Ok(envelope.data)
    }

    async fn write_atomic(&self, contents: &str) -> Result<()> {
        let temp_path = self.config.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.config.path).await?;
        Ok(())
    }

    /// Shift existing backups up by one and copy the current document to backup 1
    async fn rotate_backups(&self) -> Result<()> {
        if self.config.backup_count == 0 || !fs::try_exists(&self.config.path).await? {
            return Ok(());
        }

        for i in (1..self.config.backup_count).rev() {
            let from = self.backup_path(i);
            if fs::try_exists(&from).await? {
                fs::rename(&from, self.backup_path(i + 1)).await?;
            }
        }

        fs::copy(&self.config.path, self.backup_path(1)).await?;
        Ok(())
    }

    /// Path of backup `n`
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let file_name = self
            .config
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state".to_string());
        self.config
            .path
            .with_file_name(format!("{}.backup.{}", file_name, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
    struct Notes {
        entries: Vec<String>,
    }

    fn notes(entries: &[&str]) -> Notes {
        Notes {
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn state_in(dir: &TempDir) -> PersistedState<Notes> {
        PersistedState::new(PersistenceConfig::new(dir.path().join("notes.json")))
    }

    #[tokio::test]
    async fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        assert_eq!(state.load().await.unwrap(), Notes::default());
    }

    #[tokio::test]
    async fn test_store_and_reload() {
        let dir = TempDir::new().unwrap();

        state_in(&dir).store(&notes(&["a", "b"])).await.unwrap();

        let reloaded = state_in(&dir).load().await.unwrap();
        assert_eq!(reloaded, notes(&["a", "b"]));
    }

    #[tokio::test]
    async fn test_envelope_on_disk() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        state.store(&notes(&["x"])).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(state.path()).await.unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["data"]["entries"][0], "x");
        assert_eq!(raw["checksum"].as_str().unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_corruption_detection() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        state.store(&notes(&["original"])).await.unwrap();

        let contents = fs::read_to_string(state.path()).await.unwrap();
        fs::write(state.path(), contents.replace("original", "tampered"))
            .await
            .unwrap();

        assert!(matches!(
            state.load().await,
            Err(PersistenceError::Corruption(_))
        ));
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = TempDir::new().unwrap();
        state_in(&dir).store(&notes(&["v1"])).await.unwrap();

        let v2: PersistedState<Notes> =
            PersistedState::new(PersistenceConfig::new(dir.path().join("notes.json")).version(2));
        assert!(matches!(
            v2.load().await,
            Err(PersistenceError::VersionMismatch { expected: 2, found: 1 })
        ));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        state.store(&notes(&["a"])).await.unwrap();

        assert!(!state.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_non_atomic_write() {
        let dir = TempDir::new().unwrap();
        let state: PersistedState<Notes> = PersistedState::new(
            PersistenceConfig::new(dir.path().join("notes.json")).atomic_writes(false),
        );
        state.store(&notes(&["direct"])).await.unwrap();

        assert_eq!(state.load().await.unwrap(), notes(&["direct"]));
    }

    #[tokio::test]
    async fn test_backup_rotation_and_restore() {
        let dir = TempDir::new().unwrap();
        let state: PersistedState<Notes> = PersistedState::new(
            PersistenceConfig::new(dir.path().join("notes.json")).backups(true, 2),
        );

        for i in 1..=3 {
            state.store(&notes(&[&i.to_string()])).await.unwrap();
        }

        // Backup 1 holds the document before the last write, backup 2 the one before that
        assert!(state.backup_path(1).exists());
        assert!(state.backup_path(2).exists());
        assert!(!state.backup_path(3).exists());

        let restored = state.restore_from_backup(2).await.unwrap();
        assert_eq!(restored, notes(&["1"]));
        assert_eq!(state.load().await.unwrap(), notes(&["1"]));
    }

    #[test]
    fn test_unreadable_errors() {
        assert!(PersistenceError::Corruption("x".to_string()).is_unreadable());
        assert!(PersistenceError::VersionMismatch { expected: 2, found: 1 }.is_unreadable());
        assert!(!PersistenceError::BackupNotFound(1).is_unreadable());
        assert!(!PersistenceError::Io(std::io::ErrorKind::PermissionDenied.into()).is_unreadable());
    }

    #[tokio::test]
    async fn test_restore_missing_backup() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        assert!(matches!(
            state.restore_from_backup(1).await,
            Err(PersistenceError::BackupNotFound(1))
        ));
    }
}
