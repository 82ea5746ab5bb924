//! Durable key-value persistence for the in-progress round.
//!
//! The round is saved as JSON under [`ROUND_KEY`] after every accepted
//! attempt and removed once the round is won or explicitly reset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ROUND_KEY: &str = "wordle";

const APP_DIR_NAME: &str = "wordle-tui";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read or write the save file")]
    Io(#[from] io::Error),

    #[error("trouble serializing or deserializing the saved round")]
    Serde(#[from] serde_json::Error),
}

/// Minimal get/set/remove store the round manager persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Serialized form of a round: the secret and every finalized attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRound {
    pub secret: String,
    #[serde(rename = "historyState", default)]
    pub history: Vec<String>,
}

impl PersistedRound {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>, StoreError> {
        match store.get(ROUND_KEY)? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let data = serde_json::to_string(self)?;
        store.set(ROUND_KEY, &data)
    }

    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
        store.remove(ROUND_KEY)
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Platform data directory for saves and logs, e.g. `~/.local/share/wordle-tui`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_round() -> PersistedRound {
        PersistedRound {
            secret: "CRANE".to_string(),
            history: vec!["SLATE".to_string(), "TRACE".to_string()],
        }
    }

    #[test]
    fn test_persisted_round_json_shape() {
        let json = serde_json::to_string(&sample_round()).unwrap();
        assert_eq!(json, r#"{"secret":"CRANE","historyState":["SLATE","TRACE"]}"#);
    }

    #[test]
    fn test_persisted_round_missing_history_defaults_empty() {
        let round: PersistedRound = serde_json::from_str(r#"{"secret":"CRANE"}"#).unwrap();
        assert!(round.history.is_empty());
    }

    #[test]
    fn test_memory_store_roundtrip_and_clear() {
        let mut store = MemoryStore::new();
        assert_eq!(PersistedRound::load(&store).unwrap(), None);

        sample_round().save(&mut store).unwrap();
        assert_eq!(PersistedRound::load(&store).unwrap(), Some(sample_round()));

        PersistedRound::clear(&mut store).unwrap();
        assert_eq!(PersistedRound::load(&store).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory() {
        let tmp = tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("saves"));

        store.set("wordle", "{}").unwrap();
        assert!(store.dir().join("wordle.json").exists());
        assert_eq!(store.get("wordle").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_missing_key() {
        let tmp = tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        assert_eq!(store.get("wordle").unwrap(), None);
        // Removing a key that was never written is not an error.
        store.remove("wordle").unwrap();
    }

    #[test]
    fn test_file_store_persists_round_across_instances() {
        let tmp = tempdir().unwrap();
        sample_round().save(&mut FileStore::new(tmp.path())).unwrap();

        let reopened = FileStore::new(tmp.path());
        assert_eq!(PersistedRound::load(&reopened).unwrap(), Some(sample_round()));
    }

    #[test]
    fn test_corrupted_save_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(ROUND_KEY, "not json").unwrap();
        assert!(matches!(
            PersistedRound::load(&store),
            Err(StoreError::Serde(_))
        ));
    }
}
