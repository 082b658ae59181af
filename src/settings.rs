use serde_json::Value;
use std::collections::HashMap;

/// In-memory key/value store for runtime preferences. Values are whole JSON
/// documents keyed by section.
#[derive(Debug, Default)]
pub struct SettingsStore {
    values: HashMap<String, Value>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_json(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set_json(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}
