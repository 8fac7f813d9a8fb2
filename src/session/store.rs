//! Process-wide store facade
//!
//! [`ChatStore`] wraps the engine for async callers: it owns the engine
//! behind a mutex, exposes the same operation surface, and provides the
//! one-shot initialization signal that every caller must await before
//! issuing any other call. The store is meant to be constructed once at
//! startup by the composition root and shared from there; there is no
//! ambient global instance.

use crate::config::Config;
use crate::session::engine::SessionEngine;
use crate::session::types::{ChatMessage, SessionData, SessionInfo};
use crate::storage::{SessionBackend, SledBackend, SqliteBackend};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

/// Async facade over the session engine
///
/// All operations are safe to call only after [`initialized`] has
/// resolved; that ordering is an explicit contract with the caller, not
/// something the store enforces internally.
///
/// [`initialized`]: ChatStore::initialized
///
/// # Examples
///
/// ```no_run
/// use chatvault::config::Config;
/// use chatvault::session::ChatStore;
///
/// # async fn example() {
/// let store = ChatStore::from_config(&Config::default());
/// store.initialized().await;
///
/// for info in store.list_sessions().await {
///     println!("{}: {}", info.id, info.title);
/// }
/// # }
/// ```
pub struct ChatStore {
    engine: Mutex<SessionEngine>,
    init: OnceCell<()>,
}

impl ChatStore {
    /// Wrap an already-constructed engine
    pub fn new(engine: SessionEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
            init: OnceCell::new(),
        }
    }

    /// Build the two-tier backend stack from configuration
    ///
    /// A backend that cannot be opened is logged and skipped rather than
    /// failing construction; with no usable backend at all the store
    /// still works, purely in memory.
    pub fn from_config(config: &Config) -> Self {
        let mut backends: Vec<Box<dyn SessionBackend>> = Vec::new();

        match config.primary_db_path() {
            Ok(path) => match SqliteBackend::open(&path) {
                Ok(backend) => backends.push(Box::new(backend)),
                Err(e) => warn!("Primary backend unusable: {}", e),
            },
            Err(e) => debug!("Primary backend unavailable: {}", e),
        }

        match config.fallback_db_path() {
            Ok(path) => match SledBackend::open(&path) {
                Ok(backend) => backends.push(Box::new(backend)),
                Err(e) => warn!("Fallback backend unusable: {}", e),
            },
            Err(e) => debug!("Fallback backend unavailable: {}", e),
        }

        Self::new(SessionEngine::with_greeting(
            backends,
            config.session.greeting.clone(),
        ))
    }

    /// Resolve once initialization has completed
    ///
    /// The first caller drives the actual load; concurrent and later
    /// callers merely wait for it. Await this before any other method.
    pub async fn initialized(&self) {
        self.init
            .get_or_init(|| async {
                self.engine.lock().await.initialize();
            })
            .await;
    }

    /// Create a new session and make it active; returns its identifier
    pub async fn create_session(&self, title: Option<&str>) -> String {
        self.engine.lock().await.create_session(title)
    }

    /// List session metadata, most recently updated first
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        self.engine.lock().await.list_sessions()
    }

    /// Make the given session active; `None` for an unknown identifier
    pub async fn switch_to(&self, id: &str) -> Option<SessionData> {
        self.engine.lock().await.switch_to(id)
    }

    /// The currently active session, if any
    pub async fn active_session(&self) -> Option<SessionData> {
        self.engine.lock().await.active_session().cloned()
    }

    /// Replace the active session's message list
    pub async fn update_messages(&self, messages: &[ChatMessage]) {
        self.engine.lock().await.update_messages(messages);
    }

    /// Remove a session
    pub async fn delete_session(&self, id: &str) {
        self.engine.lock().await.delete_session(id);
    }

    /// Rename a session; empty titles are silently ignored
    pub async fn rename_session(&self, id: &str, new_title: &str) {
        self.engine.lock().await.rename_session(id, new_title);
    }

    /// Remove every session and start over with a single fresh one
    pub async fn clear_all(&self) {
        self.engine.lock().await.clear_all();
    }
}
