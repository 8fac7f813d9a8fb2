//! Session and message types for ChatVault
//!
//! This module defines the chat message shape shared with the completion
//! client, the per-session metadata record, and the full session payload
//! that the engine keeps in memory and the backends persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting message seeded into every newly created session
pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Prefix of auto-generated session titles
///
/// A title that still starts with this prefix is considered a placeholder
/// and remains eligible for automatic replacement by content-derived text.
pub const TITLE_PLACEHOLDER_PREFIX: &str = "New Chat";

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message written by the human user
    User,
    /// Message produced by the assistant
    Assistant,
    /// System-level instruction message
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single chat message
///
/// Messages are produced by the UI or the completion client and handed to
/// the engine as a full replacement list; the engine never appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use chatvault::session::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Metadata describing one session
///
/// The `message_count` and `last_message` fields are derived from the
/// session's message list and are never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Opaque, globally unique session identifier
    pub id: String,

    /// Display title; starts as a placeholder, renameable
    pub title: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last-updated timestamp, monotonically non-decreasing
    pub updated_at: DateTime<Utc>,

    /// Number of messages currently in the session
    pub message_count: usize,

    /// Preview of the most recent message, truncated for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

impl SessionInfo {
    /// Whether the title is still the auto-generated placeholder
    ///
    /// A manual rename replaces the placeholder, after which automatic
    /// title derivation no longer applies.
    pub fn has_placeholder_title(&self) -> bool {
        self.title.starts_with(TITLE_PLACEHOLDER_PREFIX)
    }

    /// Refresh `updated_at`, clamped so it never moves backwards
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// One session: its metadata plus the full ordered message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Session metadata
    pub info: SessionInfo,
    /// Ordered message history, oldest first
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_role_display_matches_serialization() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert_eq!(Role::System.to_string(), "system");
    }

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::assistant("Hello, user!");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hello, user!");

        let msg = ChatMessage::system("You are a helpful assistant");
        assert_eq!(msg.role, Role::System);
    }

    #[test]
    fn test_session_info_camel_case_fields() {
        let info = SessionInfo {
            id: "session_1".to_string(),
            title: "Test".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            message_count: 2,
            last_message: Some("hi".to_string()),
        };

        let json = serde_json::to_value(&info).expect("serialize failed");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("messageCount").is_some());
        assert!(json.get("lastMessage").is_some());
    }

    #[test]
    fn test_session_info_omits_absent_preview() {
        let info = SessionInfo {
            id: "session_1".to_string(),
            title: "Test".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            message_count: 0,
            last_message: None,
        };

        let json = serde_json::to_value(&info).expect("serialize failed");
        assert!(json.get("lastMessage").is_none());
    }

    #[test]
    fn test_placeholder_title_detection() {
        let mut info = SessionInfo {
            id: "session_1".to_string(),
            title: format!("{} 2026-08-07", TITLE_PLACEHOLDER_PREFIX),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            message_count: 0,
            last_message: None,
        };
        assert!(info.has_placeholder_title());

        info.title = "Quicksort question".to_string();
        assert!(!info.has_placeholder_title());
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let future = Utc::now() + chrono::Duration::hours(1);
        let mut info = SessionInfo {
            id: "session_1".to_string(),
            title: "Test".to_string(),
            created_at: Utc::now(),
            updated_at: future,
            message_count: 0,
            last_message: None,
        };

        info.touch();
        assert_eq!(info.updated_at, future);
    }

    #[test]
    fn test_session_data_round_trip() {
        let data = SessionData {
            info: SessionInfo {
                id: "session_1".to_string(),
                title: "Test".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
                message_count: 1,
                last_message: Some("hello".to_string()),
            },
            messages: vec![ChatMessage::assistant("hello")],
        };

        let json = serde_json::to_string(&data).expect("serialize failed");
        let back: SessionData = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, data);
    }
}
