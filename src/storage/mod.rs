//! Storage backends for ChatVault
//!
//! Two adapters implement the same contract: a transactional SQLite store
//! preferred when available, and a sled key-value store used as a fallback
//! when SQLite cannot be opened or a write against it fails. Both translate
//! between the engine's in-memory shape and two logical records: the full
//! session list and the active-session identifier.

pub mod sled_kv;
pub mod sqlite;
pub mod types;

pub use sled_kv::SledBackend;
pub use sqlite::SqliteBackend;
pub use types::{PersistedState, SCHEMA_VERSION};

use crate::error::StoreError;

/// Contract implemented by both storage tiers
///
/// Adapters are stateless translators: apart from their open handle they
/// retain nothing between calls, so the engine's in-memory state is the
/// single source of truth for the running process.
pub trait SessionBackend: Send + Sync {
    /// Short backend name used in diagnostics
    fn name(&self) -> &'static str;

    /// Read both logical records
    ///
    /// Missing records resolve to an empty session list and no active
    /// identifier, not an error.
    fn load_all(&self) -> Result<PersistedState, StoreError>;

    /// Overwrite both logical records
    ///
    /// Atomic with respect to each other on the primary backend (a single
    /// transaction); best-effort sequential writes on the fallback.
    fn save_all(&self, state: &PersistedState) -> Result<(), StoreError>;
}
