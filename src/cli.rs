//! Command-line interface definition for ChatVault
//!
//! This module defines the CLI structure using clap's derive API,
//! providing subcommands for inspecting and managing stored sessions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ChatVault - chat session persistence engine
///
/// Stores conversation sessions in a two-tier local store and exposes
/// CRUD operations over them.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Override the data directory used by both storage backends
    #[arg(long, env = "CHATVAULT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ChatVault
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect and manage stored sessions
    Sessions {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List all sessions, most recently updated first
    List,

    /// Create a new session and make it active
    New {
        /// Optional title (a placeholder is generated when omitted)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Make the given session active and print it
    Switch {
        /// Session identifier
        id: String,
    },

    /// Print the active session transcript
    Show,

    /// Append a message to the active session
    Append {
        /// Message content
        content: String,

        /// Message role (user, assistant, system)
        #[arg(short, long, default_value = "user")]
        role: String,
    },

    /// Rename a session
    Rename {
        /// Session identifier
        id: String,

        /// New title
        title: String,
    },

    /// Delete a session
    Delete {
        /// Session identifier
        id: String,
    },

    /// Delete every session and start over
    Clear {
        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
