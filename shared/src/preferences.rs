//! User preference persistence
//!
//! The only persisted state is the dark-mode flag. Hosts provide a durable
//! key-value store (browser local storage, a file on disk); this module owns
//! the key and the value encoding.

use crate::errors::PreferenceError;
use std::collections::HashMap;

/// Key under which the dark-mode flag is stored
pub const DARK_MODE_KEY: &str = "darkMode";

/// Durable string key-value store
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Decode a stored dark-mode value; absent or malformed means off
pub fn parse_dark_mode(stored: Option<&str>) -> bool {
    stored
        .and_then(|raw| serde_json::from_str::<bool>(raw).ok())
        .unwrap_or(false)
}

/// Encode the dark-mode flag as stored
pub fn encode_dark_mode(enabled: bool) -> String {
    // JSON literal, so the value reads back the same from any host
    serde_json::Value::Bool(enabled).to_string()
}

/// Read the dark-mode flag from a store
pub fn load_dark_mode<S: PreferenceStore + ?Sized>(store: &S) -> bool {
    parse_dark_mode(store.get_item(DARK_MODE_KEY).as_deref())
}

/// Write the dark-mode flag to a store
pub fn save_dark_mode<S: PreferenceStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<(), PreferenceError> {
    store.set_item(DARK_MODE_KEY, &encode_dark_mode(enabled))
}

/// Non-durable store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
