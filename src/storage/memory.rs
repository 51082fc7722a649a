use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{SettingsStore, StoreError};

/// In-process store. Optionally fails every save, to exercise rollback paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<Value>>,
    saves: AtomicUsize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: Mutex::new(Some(data)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.data.lock().map(|data| data.clone()).unwrap_or(None)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, data: &Value) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::other("save rejected"),
            });
        }
        if let Ok(mut slot) = self.data.lock() {
            *slot = Some(data.clone());
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
