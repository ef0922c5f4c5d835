//! Settings persistence adapters.
//!
//! [`StoredSettings`] implements [`ConfigPort`] on top of any
//! [`StoragePort`] by postcard-encoding the [`GameConfig`] into a single
//! blob. Two storage backends are provided:
//!
//! - [`MemoryStorage`]: a map held in RAM, for tests.
//! - [`FileStorage`]: one file per key under a state directory, for the
//!   simulator. Writes go to a temp file that is then renamed over the
//!   target, so a crash never leaves a half-written blob.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::GameConfig;

const SETTINGS_NAMESPACE: &str = "prop";
const SETTINGS_KEY: &str = "settings";

/// Upper bound on the encoded config. The current layout needs ~20 bytes.
const MAX_BLOB_SIZE: usize = 128;

// ───────────────────────────────────────────────────────────────
// StoredSettings
// ───────────────────────────────────────────────────────────────

/// [`ConfigPort`] backed by a key-value store.
pub struct StoredSettings<S> {
    storage: S,
}

impl<S: StoragePort> StoredSettings<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether a config blob has ever been saved.
    pub fn has_saved_config(&self) -> bool {
        self.storage.exists(SETTINGS_NAMESPACE, SETTINGS_KEY)
    }

    /// Drop the saved blob so the next load returns defaults.
    pub fn erase(&mut self) -> crate::error::Result<()> {
        self.storage.delete(SETTINGS_NAMESPACE, SETTINGS_KEY)?;
        info!("settings: erased");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: StoragePort> ConfigPort for StoredSettings<S> {
    fn load(&self) -> Result<GameConfig, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let len = match self.storage.read(SETTINGS_NAMESPACE, SETTINGS_KEY, &mut buf) {
            Ok(len) => len,
            Err(StorageError::NotFound) => {
                info!("settings: nothing stored, using defaults");
                return Ok(GameConfig::default());
            }
            Err(e) => {
                warn!("settings: read failed: {}", e);
                return Err(e.into());
            }
        };
        let config: GameConfig =
            postcard::from_bytes(&buf[..len]).map_err(|_| ConfigError::Corrupted)?;
        info!("settings: loaded {} bytes", len);
        Ok(config.sanitized())
    }

    fn save(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let bytes = postcard::to_slice(config, &mut buf).map_err(|_| ConfigError::IoError)?;
        self.storage
            .write(SETTINGS_NAMESPACE, SETTINGS_KEY, bytes)?;
        info!("settings: saved {} bytes", bytes.len());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// MemoryStorage
// ───────────────────────────────────────────────────────────────

/// Volatile [`StoragePort`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let data = self
            .store
            .get(&Self::composite_key(namespace, key))
            .ok_or(StorageError::NotFound)?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .contains_key(&Self::composite_key(namespace, key))
    }
}

// ───────────────────────────────────────────────────────────────
// FileStorage
// ───────────────────────────────────────────────────────────────

/// [`StoragePort`] writing `<root>/<namespace>/<key>.bin`.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, namespace: &str, key: &str) -> PathBuf {
        self.root.join(namespace).join(format!("{key}.bin"))
    }
}

fn map_io(e: &std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::IoError,
    }
}

impl StoragePort for FileStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let data = fs::read(self.path(namespace, key)).map_err(|e| map_io(&e))?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let target = self.path(namespace, key);
        let tmp = target.with_extension("tmp");
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|e| map_io(&e))?;
        }
        fs::write(&tmp, data).map_err(|e| map_io(&e))?;
        fs::rename(&tmp, &target).map_err(|e| {
            warn!("storage: rename into {} failed: {}", target.display(), e);
            map_io(&e)
        })
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(namespace, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&e)),
        }
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.path(namespace, key).is_file()
    }
}
