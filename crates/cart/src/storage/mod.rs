//! Persistence slots for the serialized cart.
//!
//! A slot is a single named location holding one string payload, overwritten
//! wholesale on every write. The store talks to it through the
//! [`CartStorage`] trait; [`FileStore`] persists across restarts,
//! [`MemoryStore`] backs tests and ephemeral sessions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur reading or writing a persistence slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the snapshot payload failed.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A key-value string store for serialized cart snapshots.
pub trait CartStorage {
    /// Read the payload stored under `key`.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing medium cannot be read.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing medium cannot be written.
    async fn save(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}
