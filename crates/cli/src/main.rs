//! Angadi CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! angadi-cli migrate
//!
//! # Seed the bootstrap superadmin (idempotent)
//! angadi-cli seed --username superadmin --password <password>
//!
//! # Generate a VAPID key pair for push delivery
//! angadi-cli vapid
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Create the bootstrap superadmin if none exists
//! - `vapid` - Generate VAPID keys for the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "angadi-cli")]
#[command(author, version, about = "Angadi CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create the bootstrap superadmin if no superadmin exists
    Seed {
        /// Superadmin username
        #[arg(short, long, default_value = "superadmin")]
        username: String,

        /// Superadmin password
        #[arg(short, long)]
        password: String,
    },
    /// Generate a VAPID key pair for web push
    Vapid,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { username, password } => {
            commands::seed::run(&username, &password).await?;
        }
        Commands::Vapid => commands::vapid::run()?,
    }
    Ok(())
}
