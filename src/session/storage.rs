use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SessionError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    hash: Option<String>,
}

/// Persisted slot for the last saved share hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashStore {
    /// JSON file on disk.
    File(PathBuf),
    /// Process-local slot that is never written to disk.
    Memory(Option<String>),
}

impl HashStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub const fn memory() -> Self {
        Self::Memory(None)
    }

    /// Default store location next to the global config file.
    pub fn default_path() -> PathBuf {
        crate::config::global_config_path()
            .parent()
            .map_or_else(|| PathBuf::from(".textarea-state.json"), |dir| dir.join("state.json"))
    }

    /// The stored hash, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        match self {
            Self::Memory(hash) => Ok(hash.clone()),
            Self::File(path) => {
                if !path.exists() {
                    return Ok(None);
                }
                let content = fs::read_to_string(path)?;
                let state: StoredState = serde_json::from_str(&content)?;
                Ok(state.hash)
            }
        }
    }

    /// Replace the stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn store(&mut self, hash: &str) -> Result<(), SessionError> {
        match self {
            Self::Memory(slot) => {
                *slot = Some(hash.to_string());
                Ok(())
            }
            Self::File(path) => write_state(path, hash),
        }
    }
}

fn write_state(path: &Path, hash: &str) -> Result<(), SessionError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let state = StoredState {
        hash: Some(hash.to_string()),
    };
    fs::write(path, serde_json::to_string_pretty(&state)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_has_no_hash() {
        let dir = tempdir().unwrap();
        let store = HashStore::at(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_store_then_load_file() {
        let dir = tempdir().unwrap();
        let mut store = HashStore::at(dir.path().join("nested").join("state.json"));
        store.store("#abc").unwrap();
        assert_eq!(store.load().unwrap(), Some("#abc".to_string()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(HashStore::at(path).load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = HashStore::memory();
        assert_eq!(store.load().unwrap(), None);
        store.store("#x").unwrap();
        assert_eq!(store.load().unwrap(), Some("#x".to_string()));
    }
}
