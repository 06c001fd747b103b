//! AgriLink CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run document-table migrations
//! agrilink-cli migrate
//!
//! # Promote an existing account to admin
//! agrilink-cli admin promote -e admin@example.com
//!
//! # Seed the catalog with sample records
//! agrilink-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin promote` - Grant the admin role to an account
//! - `seed` - Seed the catalog with sample soil types and distributors

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "agrilink-cli")]
#[command(author, version, about = "AgriLink CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the catalog with sample records
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Promote an existing account to admin
    ///
    /// This is the only supported promotion path; the registration form
    /// always creates plain users. If the account's profile document is
    /// missing it is recreated as part of the promotion.
    Promote {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
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
        Commands::Admin { action } => match action {
            AdminAction::Promote { email } => {
                commands::admin::promote(&email).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
