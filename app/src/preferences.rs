//! File-backed preference store
//!
//! Stands in for browser local storage: a flat JSON object of string values,
//! rewritten in full on every write.

use fitness_tracker_shared::{PreferenceError, PreferenceStore};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable preference store kept in a JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// Never fails: a missing file opens an empty store, and a file that
    /// cannot be read or decoded is logged and treated as empty. Preferences
    /// then start from their defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let items = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring undecodable preferences file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read preferences file, using defaults");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), entries = items.len(), "Opened preference store");
        Self { path, items }
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PreferenceError::Write(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| PreferenceError::Encoding(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| PreferenceError::Write(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.items.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_tracker_shared::preferences::{load_dark_mode, save_dark_mode};

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("prefs.json"));
        assert!(store.get_item("darkMode").is_none());
        assert!(!load_dark_mode(&store));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FileStore::open(&path);
        save_dark_mode(&mut store, true).unwrap();

        assert!(path.exists());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"darkMode\": \"true\""));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path);
        assert!(!load_dark_mode(&store));

        save_dark_mode(&mut store, true).unwrap();
        let reopened = FileStore::open(&path);
        assert!(load_dark_mode(&reopened));
    }

    #[test]
    fn test_unreadable_path_opens_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists at the path, so reading it fails with something other than NotFound
        let path = dir.path().join("prefs.json");
        fs::create_dir(&path).unwrap();

        let mut store = FileStore::open(&path);
        assert!(!load_dark_mode(&store));

        let err = save_dark_mode(&mut store, true).unwrap_err();
        assert!(matches!(err, PreferenceError::Write(_)));
        assert_eq!(store.get_item("darkMode").as_deref(), Some("true"));
    }
}
