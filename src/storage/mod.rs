use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, get_data_location};
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed settings object: {0}")]
    Malformed(String),
}

/// Host-provided key/value blob holding the whole settings object.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<Value>, StoreError>;
    async fn save(&self, data: &Value) -> Result<(), StoreError>;
}
