//! Primary storage backend backed by SQLite
//!
//! Holds exactly two rows in a `chat_records` key/value table: the full
//! session list and the active-session identifier, each serialized as a
//! JSON document. `PRAGMA user_version` gates one-time table creation and
//! rejects databases written by a newer schema.

use crate::error::StoreError;
use crate::storage::types::{PersistedState, ACTIVE_ID_KEY, SCHEMA_VERSION, SESSIONS_KEY};
use crate::storage::SessionBackend;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// Transactional primary backend
#[derive(Debug)]
pub struct SqliteBackend {
    db_path: PathBuf,
}

impl SqliteBackend {
    /// Open the database, creating the schema on first use
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the database cannot be opened or
    /// its schema version is newer than this build supports.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatvault::storage::SqliteBackend;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let backend = SqliteBackend::open(dir.path().join("sessions.db")).unwrap();
    /// ```
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!(
                    "Failed to create parent directory for database: {}",
                    e
                ))
            })?;
        }

        let backend = Self { db_path };
        backend.init()?;
        Ok(backend)
    }

    /// Initialize the database schema
    ///
    /// Table creation runs only when `user_version` is older than the
    /// current schema; the version is stamped afterwards.
    fn init(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| StoreError::Backend(format!("Failed to read schema version: {}", e)))?;

        if version > SCHEMA_VERSION as i64 {
            return Err(StoreError::Backend(format!(
                "Database schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            )));
        }

        if version < SCHEMA_VERSION as i64 {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS chat_records (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )",
                [],
            )
            .map_err(|e| StoreError::Backend(format!("Failed to create table: {}", e)))?;

            conn.pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(|e| {
                    StoreError::Backend(format!("Failed to stamp schema version: {}", e))
                })?;
        }

        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.db_path)
            .map_err(|e| StoreError::Backend(format!("Failed to open database: {}", e)))
    }

    fn get_record(&self, conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
        conn.query_row(
            "SELECT value FROM chat_records WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StoreError::Backend(format!("Failed to read record {}: {}", key, e)))
    }
}

impl SessionBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load_all(&self) -> Result<PersistedState, StoreError> {
        let conn = self.connect()?;

        let sessions = match self.get_record(&conn, SESSIONS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StoreError::Backend(format!("Corrupt sessions record: {}", e)))?,
            None => Vec::new(),
        };

        let current_session_id = match self.get_record(&conn, ACTIVE_ID_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StoreError::Backend(format!("Corrupt active-id record: {}", e)))?,
            None => None,
        };

        Ok(PersistedState::new(sessions, current_session_id))
    }

    fn save_all(&self, state: &PersistedState) -> Result<(), StoreError> {
        let sessions_json = serde_json::to_string(&state.sessions)
            .map_err(|e| StoreError::Backend(format!("Failed to serialize sessions: {}", e)))?;
        let active_json = serde_json::to_string(&state.current_session_id)
            .map_err(|e| StoreError::Backend(format!("Failed to serialize active id: {}", e)))?;

        let mut conn = self.connect()?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Backend(format!("Failed to start transaction: {}", e)))?;

        tx.execute(
            "INSERT OR REPLACE INTO chat_records (key, value) VALUES (?, ?)",
            params![SESSIONS_KEY, sessions_json],
        )
        .map_err(|e| StoreError::Backend(format!("Failed to write sessions record: {}", e)))?;

        tx.execute(
            "INSERT OR REPLACE INTO chat_records (key, value) VALUES (?, ?)",
            params![ACTIVE_ID_KEY, active_json],
        )
        .map_err(|e| StoreError::Backend(format!("Failed to write active-id record: {}", e)))?;

        tx.commit()
            .map_err(|e| StoreError::Backend(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }
}
