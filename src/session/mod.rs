//! Session model, persistence engine, and store facade

pub mod engine;
pub mod store;
pub mod types;

pub use engine::{new_session_id, SessionEngine};
pub use store::ChatStore;
pub use types::{
    ChatMessage, Role, SessionData, SessionInfo, DEFAULT_GREETING, TITLE_PLACEHOLDER_PREFIX,
};
