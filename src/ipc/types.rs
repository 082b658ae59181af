use crate::records::Records;
use crate::settings::SettingsStore;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub records: Records,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            records: Records::new(today),
            settings: SettingsStore::new(),
        }
    }
}
