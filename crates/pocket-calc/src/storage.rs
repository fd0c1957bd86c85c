//! Key/value persistence for history and theme
//!
//! Storage is best-effort. [`Persistence`] never returns an error: failures
//! are logged and the in-memory state stays authoritative for the session.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::history::History;
use crate::theme::Theme;

/// Key holding the history as a JSON array of strings
pub const HISTORY_KEY: &str = "calculatorHistory";
/// Key holding the active theme identifier
pub const THEME_KEY: &str = "calculatorTheme";

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Stored value is not valid JSON of the expected shape
    #[error("Malformed stored value: {0}")]
    Json(#[from] serde_json::Error),
    /// Key that cannot be used as a file name
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key/value store
pub trait Storage: fmt::Debug {
    /// Reads a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Storage that lives and dies with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let staging = path.with_extension("tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

/// Loads and saves calculator state over any [`Storage`]
#[derive(Debug)]
pub struct Persistence {
    storage: Box<dyn Storage>,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Persistence {
    /// Wraps a storage backend
    #[must_use]
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Persistence that forgets everything on exit
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Loads history; missing or malformed data yields an empty history
    #[must_use]
    pub fn load_history(&self) -> History {
        match self.try_load_history() {
            Ok(Some(history)) => {
                debug!(entries = history.len(), "loaded history");
                history
            }
            Ok(None) => History::new(),
            Err(error) => {
                warn!(%error, "failed to load history, starting empty");
                History::new()
            }
        }
    }

    fn try_load_history(&self) -> StorageResult<Option<History>> {
        match self.storage.get(HISTORY_KEY)? {
            Some(json) => Ok(Some(History::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Loads the theme, using `fallback` when nothing usable is stored
    #[must_use]
    pub fn load_theme_or(&self, fallback: &'static Theme) -> &'static Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(id)) => Theme::find(id.trim()).unwrap_or_else(|| {
                warn!(id = id.trim(), "unknown stored theme, using fallback");
                fallback
            }),
            Ok(None) => fallback,
            Err(error) => {
                warn!(%error, "failed to load theme, using fallback");
                fallback
            }
        }
    }

    /// Saves history and theme; failures are logged and swallowed
    pub fn save(&mut self, history: &History, theme: &Theme) {
        if let Err(error) = self.try_save(history, theme) {
            warn!(%error, "failed to save calculator state");
        }
    }

    fn try_save(&mut self, history: &History, theme: &Theme) -> StorageResult<()> {
        self.storage.set(HISTORY_KEY, &history.to_json()?)?;
        self.storage.set(THEME_KEY, theme.id)
    }
}
