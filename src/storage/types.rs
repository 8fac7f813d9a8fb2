//! Persisted document types shared by both storage backends

use crate::error::StoreError;
use crate::session::SessionData;
use serde::{Deserialize, Serialize};

/// Current persisted schema version
///
/// Bumping this gates one-time table creation on the primary backend and
/// tags the fallback document; documents claiming a newer version are
/// rejected on load instead of being trusted blindly.
pub const SCHEMA_VERSION: u32 = 2;

/// Logical key for the all-sessions record on the primary backend
pub(crate) const SESSIONS_KEY: &str = "sessions_data";

/// Logical key for the active-session-id record on the primary backend
pub(crate) const ACTIVE_ID_KEY: &str = "current_session_id";

/// Fixed key for the single document on the fallback backend
pub(crate) const FALLBACK_KEY: &str = "chat_sessions";

/// Snapshot of the whole store as it crosses the backend boundary
///
/// Sessions are kept as an ordered pair list rather than a map so the
/// engine's insertion order survives a round trip through either backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Schema version the document was written with
    #[serde(default = "current_schema_version")]
    pub schema: u32,

    /// Ordered `(id, session)` pairs
    pub sessions: Vec<(String, SessionData)>,

    /// Identifier of the active session, if any
    pub current_session_id: Option<String>,
}

fn current_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl PersistedState {
    /// Build a snapshot tagged with the current schema version
    pub fn new(sessions: Vec<(String, SessionData)>, current_session_id: Option<String>) -> Self {
        Self {
            schema: SCHEMA_VERSION,
            sessions,
            current_session_id,
        }
    }

    /// Reject documents written by a newer schema than this build knows
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.schema > SCHEMA_VERSION {
            return Err(StoreError::Backend(format!(
                "Unsupported schema version {} (newest known is {})",
                self.schema, SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_empty_and_current() {
        let state = PersistedState::default();
        assert_eq!(state.schema, SCHEMA_VERSION);
        assert!(state.sessions.is_empty());
        assert!(state.current_session_id.is_none());
    }

    #[test]
    fn test_validate_accepts_current_and_older() {
        let mut state = PersistedState::default();
        assert!(state.validate().is_ok());

        state.schema = 1;
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_newer_schema() {
        let mut state = PersistedState::default();
        state.schema = SCHEMA_VERSION + 1;

        let err = state.validate().expect_err("newer schema should be rejected");
        assert!(err.to_string().contains("Unsupported schema version"));
    }

    #[test]
    fn test_missing_schema_field_defaults_to_current() {
        let json = r#"{"sessions": [], "currentSessionId": null}"#;
        let state: PersistedState = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(state.schema, SCHEMA_VERSION);
    }

    #[test]
    fn test_document_uses_camel_case_active_id() {
        let state = PersistedState::new(Vec::new(), Some("session_1".to_string()));
        let json = serde_json::to_value(&state).expect("serialize failed");
        assert_eq!(
            json.get("currentSessionId").and_then(|v| v.as_str()),
            Some("session_1")
        );
    }
}
