//! Makan CLI - catalog seeding and gateway checks.
//!
//! # Usage
//!
//! ```bash
//! # Push the sample catalog into the hosted data store
//! makan-cli seed
//!
//! # Verify both gateways are reachable
//! makan-cli check
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed the data store with a small sample catalog
//! - `check` - Check data store and identity provider connectivity

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "makan-cli")]
#[command(author, version, about = "Makan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the hosted data store with a sample catalog
    Seed,
    /// Check gateway connectivity
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run().await?,
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
