//! Fallback storage backend backed by sled
//!
//! Keeps the entire store under one fixed key as a single JSON document
//! with the session list and the active-session identifier. Used when the
//! SQLite backend cannot be opened or a write against it fails.

use crate::error::StoreError;
use crate::storage::types::{PersistedState, FALLBACK_KEY};
use crate::storage::SessionBackend;
use sled::Db;
use std::path::Path;

/// Flat key-value fallback backend
pub struct SledBackend {
    db: Db,
}

impl SledBackend {
    /// Open or create the key-value store
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the store cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Backend(format!("Failed to open key-value store: {}", e)))?;
        Ok(Self { db })
    }
}

impl SessionBackend for SledBackend {
    fn name(&self) -> &'static str {
        "sled"
    }

    fn load_all(&self) -> Result<PersistedState, StoreError> {
        match self
            .db
            .get(FALLBACK_KEY)
            .map_err(|e| StoreError::Backend(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let state: PersistedState = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Backend(format!("Corrupt store document: {}", e)))?;
                state.validate()?;
                Ok(state)
            }
            None => Ok(PersistedState::default()),
        }
    }

    fn save_all(&self, state: &PersistedState) -> Result<(), StoreError> {
        let value = serde_json::to_vec(state)
            .map_err(|e| StoreError::Backend(format!("Serialization failed: {}", e)))?;

        self.db
            .insert(FALLBACK_KEY, value)
            .map_err(|e| StoreError::Backend(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| StoreError::Backend(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
