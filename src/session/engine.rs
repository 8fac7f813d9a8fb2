//! Session persistence engine
//!
//! Owns the in-memory session map and the active-session pointer, performs
//! all CRUD operations, derives display metadata, and round-trips state
//! through whichever storage backend is available. In-memory state is
//! always updated before the durable write is issued, so reads never block
//! on I/O and backend failures never fail a mutation.

use crate::error::StoreError;
use crate::session::types::{
    ChatMessage, Role, SessionData, SessionInfo, DEFAULT_GREETING, TITLE_PLACEHOLDER_PREFIX,
};
use crate::storage::{PersistedState, SessionBackend};
use chrono::Utc;
use indexmap::IndexMap;
use rand::distr::{Alphanumeric, SampleString};
use tracing::{debug, error, info, warn};

/// Maximum characters of a derived session title
const TITLE_MAX_CHARS: usize = 20;

/// Maximum characters of the last-message preview
const PREVIEW_MAX_CHARS: usize = 50;

/// Marker appended to truncated titles and previews
const ELLIPSIS: &str = "...";

/// Length of the random suffix in generated session identifiers
const ID_SUFFIX_LEN: usize = 9;

/// Generate a new session identifier
///
/// Identifiers compose the current epoch-millisecond timestamp with a
/// random alphanumeric suffix, so collisions are only possible within the
/// same millisecond and are re-checked against the live map anyway.
///
/// # Examples
///
/// ```
/// use chatvault::session::new_session_id;
///
/// let id = new_session_id();
/// assert!(id.starts_with("session_"));
/// ```
pub fn new_session_id() -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), ID_SUFFIX_LEN);
    format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Truncate to `max` characters, appending an ellipsis when content was cut
fn truncate_chars(content: &str, max: usize) -> String {
    let mut truncated: String = content.chars().take(max).collect();
    if content.chars().count() > max {
        truncated.push_str(ELLIPSIS);
    }
    truncated
}

fn validate_title(title: &str) -> Result<&str, StoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation("Title must not be empty".to_string()));
    }
    Ok(trimmed)
}

/// Core session store engine
///
/// Backends are tried in priority order: the first one that serves the
/// initial load becomes the preferred write target for the rest of the
/// process lifetime. A failed write falls back to the other backend for
/// that single write; a total write failure is logged and absorbed since
/// in-memory state is authoritative.
///
/// `initialize` must complete before any other operation is invoked. The
/// [`ChatStore`](crate::session::ChatStore) facade enforces this ordering
/// for async callers.
pub struct SessionEngine {
    sessions: IndexMap<String, SessionData>,
    active_id: Option<String>,
    initialized: bool,
    backends: Vec<Box<dyn SessionBackend>>,
    preferred: usize,
    greeting: String,
}

impl SessionEngine {
    /// Create an engine over backends in priority order
    ///
    /// An empty backend list is allowed: the engine then operates purely
    /// in memory, which is the degraded mode used when no storage
    /// capability exists at all.
    pub fn new(backends: Vec<Box<dyn SessionBackend>>) -> Self {
        Self::with_greeting(backends, DEFAULT_GREETING)
    }

    /// Create an engine with a custom greeting for new sessions
    pub fn with_greeting(
        backends: Vec<Box<dyn SessionBackend>>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            sessions: IndexMap::new(),
            active_id: None,
            initialized: false,
            backends,
            preferred: 0,
            greeting: greeting.into(),
        }
    }

    /// Load persisted state and guarantee at least one session exists
    ///
    /// The first backend whose `load_all` succeeds becomes the preferred
    /// write target. An unavailable backend is expected and logged at
    /// debug; any other load failure is logged at warn. When every backend
    /// fails the engine starts empty and a session is synthesized in
    /// memory, so the application always has something to operate on.
    ///
    /// Runs at most once; repeated calls are ignored.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!("Session engine already initialized, ignoring repeated call");
            return;
        }

        let mut loaded = None;
        for (index, backend) in self.backends.iter().enumerate() {
            match backend.load_all() {
                Ok(state) => {
                    info!(
                        "Loaded {} session(s) via {} backend",
                        state.sessions.len(),
                        backend.name()
                    );
                    loaded = Some((index, state));
                    break;
                }
                Err(StoreError::BackendUnavailable(reason)) => {
                    debug!("{} backend unavailable: {}", backend.name(), reason);
                }
                Err(e) => {
                    warn!("Failed to load sessions via {} backend: {}", backend.name(), e);
                }
            }
        }

        if let Some((index, state)) = loaded {
            self.preferred = index;
            self.sessions = state.sessions.into_iter().collect();
            self.active_id = state.current_session_id;
        }

        // A persisted pointer may refer to a session that no longer exists
        // in the loaded map; reassign rather than serve a dangling id.
        if let Some(id) = self.active_id.clone() {
            if !self.sessions.contains_key(&id) {
                warn!("Persisted active session {} not found, reassigning", id);
                self.active_id = self.most_recent_id();
            }
        }

        if self.sessions.is_empty() {
            self.create_session(None);
        }

        self.initialized = true;
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create a new session, make it active, and persist
    ///
    /// When no title is given the session starts with a placeholder title
    /// that stays eligible for automatic derivation from the first user
    /// message. Returns the new session's identifier.
    pub fn create_session(&mut self, title: Option<&str>) -> String {
        let now = Utc::now();
        let id = self.unique_session_id();
        let title = match title {
            Some(t) => t.to_string(),
            None => format!("{} {}", TITLE_PLACEHOLDER_PREFIX, now.format("%Y-%m-%d")),
        };

        let messages = vec![ChatMessage::assistant(self.greeting.clone())];
        let info = SessionInfo {
            id: id.clone(),
            title,
            created_at: now,
            updated_at: now,
            message_count: messages.len(),
            last_message: messages
                .last()
                .map(|m| truncate_chars(&m.content, PREVIEW_MAX_CHARS)),
        };

        self.sessions.insert(id.clone(), SessionData { info, messages });
        self.active_id = Some(id.clone());
        self.persist();

        info!("Created session {}", id);
        id
    }

    /// List session metadata, most recently updated first
    ///
    /// The sort is stable, so sessions sharing a timestamp keep their
    /// insertion order.
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        let mut infos: Vec<SessionInfo> = self.sessions.values().map(|s| s.info.clone()).collect();
        infos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        infos
    }

    /// Make the given session active and return it
    ///
    /// An unknown identifier is a normal outcome: the engine returns
    /// `None` and leaves all state unchanged. Switching never bumps
    /// `updated_at`.
    pub fn switch_to(&mut self, id: &str) -> Option<SessionData> {
        if !self.sessions.contains_key(id) {
            debug!("Cannot switch to unknown session {}", id);
            return None;
        }

        self.active_id = Some(id.to_string());
        self.persist();
        self.sessions.get(id).cloned()
    }

    /// The currently active session, if any
    ///
    /// Pure in-memory lookup, no I/O.
    pub fn active_session(&self) -> Option<&SessionData> {
        self.active_id
            .as_deref()
            .and_then(|id| self.sessions.get(id))
    }

    /// Identifier of the currently active session, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Replace the active session's message list and refresh its metadata
    ///
    /// Creates a session first when none is active. The supplied slice is
    /// copied, so the caller's buffer never aliases engine state. The
    /// title is derived from the first user message only while it still
    /// holds its placeholder form; `message_count` and the last-message
    /// preview are always recomputed.
    pub fn update_messages(&mut self, messages: &[ChatMessage]) {
        let id = match self.active_id.clone() {
            Some(id) => id,
            None => self.create_session(None),
        };

        if let Some(session) = self.sessions.get_mut(&id) {
            session.messages = messages.to_vec();
            session.info.touch();
            session.info.message_count = messages.len();

            if session.info.has_placeholder_title() {
                if let Some(first_user) = messages.iter().find(|m| m.role == Role::User) {
                    session.info.title =
                        truncate_chars(first_user.content.trim(), TITLE_MAX_CHARS);
                }
            }

            session.info.last_message = messages
                .last()
                .map(|m| truncate_chars(&m.content, PREVIEW_MAX_CHARS));

            self.persist();
        }
    }

    /// Remove a session and persist
    ///
    /// Deleting the active session reassigns the pointer to the most
    /// recently updated survivor, or creates a fresh session when the map
    /// empties. Deleting an unknown identifier is a no-op.
    pub fn delete_session(&mut self, id: &str) {
        if self.sessions.shift_remove(id).is_none() {
            debug!("Ignoring delete of unknown session {}", id);
            return;
        }

        info!("Deleted session {}", id);

        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.most_recent_id();
            if self.active_id.is_none() {
                // create_session persists and re-establishes the pointer
                self.create_session(None);
                return;
            }
        }

        self.persist();
    }

    /// Set a session's title verbatim and persist
    ///
    /// An empty or whitespace-only title is silently ignored. A manual
    /// rename always wins: the new title replaces the placeholder, so
    /// automatic derivation no longer applies.
    pub fn rename_session(&mut self, id: &str, new_title: &str) {
        let trimmed = match validate_title(new_title) {
            Ok(t) => t,
            Err(e) => {
                debug!("Rename of session {} rejected: {}", id, e);
                return;
            }
        };

        match self.sessions.get_mut(id) {
            Some(session) => {
                session.info.title = trimmed.to_string();
                session.info.touch();
                self.persist();
            }
            None => debug!("Ignoring rename of unknown session {}", id),
        }
    }

    /// Remove every session and start over with a single fresh one
    pub fn clear_all(&mut self) {
        self.sessions.clear();
        self.active_id = None;
        self.create_session(None);
    }

    /// Identifier of the most recently updated session
    fn most_recent_id(&self) -> Option<String> {
        self.list_sessions().first().map(|info| info.id.clone())
    }

    fn unique_session_id(&self) -> String {
        loop {
            let id = new_session_id();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }

    /// Write the current state through the preferred backend
    ///
    /// On failure the remaining backends are tried for this single write.
    /// The preferred backend is not demoted: selection happened at
    /// initialization time and a transient write failure does not change
    /// it. A total failure leaves memory as the only copy.
    fn persist(&self) {
        if self.backends.is_empty() {
            debug!("No storage backend available, keeping sessions in memory only");
            return;
        }

        let state = self.snapshot();

        let preferred = &self.backends[self.preferred];
        match preferred.save_all(&state) {
            Ok(()) => return,
            Err(e) => warn!("Failed to save via {} backend: {}", preferred.name(), e),
        }

        for (index, backend) in self.backends.iter().enumerate() {
            if index == self.preferred {
                continue;
            }
            match backend.save_all(&state) {
                Ok(()) => {
                    debug!("Saved sessions via {} backend after write failure", backend.name());
                    return;
                }
                Err(e) => warn!("Failed to save via {} backend: {}", backend.name(), e),
            }
        }

        error!("All storage backends failed to save; sessions kept in memory only");
    }

    fn snapshot(&self) -> PersistedState {
        PersistedState::new(
            self.sessions
                .iter()
                .map(|(id, session)| (id.clone(), session.clone()))
                .collect(),
            self.active_id.clone(),
        )
    }
}
