//! Error types for ChatVault
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for ChatVault operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, backend selection, and durable reads/writes.
/// Backend failures are deliberately coarse-grained: the engine only
/// distinguishes "the platform cannot provide this backend" from "the
/// backend exists but an operation failed".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The platform lacks the capability for a backend (expected, not fatal)
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend I/O or transaction failure (unexpected but non-fatal)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Rejected input, e.g. an empty rename title (silently ignored upstream)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for ChatVault operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation at the
/// command level. Backend adapters return `StoreError` directly so the
/// engine can branch on the failure kind.
pub type Result<T> = anyhow::Result<T>;
