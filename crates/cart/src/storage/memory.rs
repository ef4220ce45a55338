//! In-memory persistence slots.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{CartStorage, StorageError};

/// Slot store backed by a shared in-memory map.
///
/// Clones share the same underlying map, so a cart re-opened from a clone
/// sees earlier writes. Contents are lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
