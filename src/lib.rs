//! ChatVault - client-resident chat session persistence
//!
//! This library stores multiple independent conversation sessions (an
//! ordered message log plus metadata each), survives process restarts,
//! and degrades gracefully when the preferred storage backend is
//! unavailable.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session types, the persistence engine, and the async
//!   store facade
//! - `storage`: the backend contract and its two implementations
//!   (transactional SQLite primary, sled key-value fallback)
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatvault::{ChatMessage, ChatStore, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     config.validate()?;
//!
//!     let store = ChatStore::from_config(&config);
//!     store.initialized().await;
//!
//!     store.update_messages(&[ChatMessage::user("Hello!")]).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, StoreError};
pub use session::{ChatMessage, ChatStore, Role, SessionData, SessionEngine, SessionInfo};
