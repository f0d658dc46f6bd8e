//! Local store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("portal").join("portal.db"))
        .unwrap_or_else(|| PathBuf::from("portal.db"))
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
