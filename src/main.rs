//! ChatVault - chat session persistence CLI
//!
#![doc = "Main entry point for the ChatVault application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatvault::cli::{Cli, Commands};
use chatvault::commands;
use chatvault::config::{Config, DATA_DIR_ENV};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a data directory on the CLI (or via env),
    // mirror it into CHATVAULT_DATA_DIR so backend path resolution can
    // pick it up without threading the override everywhere.
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(DATA_DIR_ENV, data_dir);
        tracing::info!("Using data directory override: {}", data_dir.display());
    }

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Sessions { command } => {
            tracing::debug!("Starting sessions command");
            commands::sessions::handle_sessions(config, command).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chatvault=debug"
    } else {
        "chatvault=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
