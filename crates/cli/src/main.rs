//! Corner Store CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cs-cli migrate
//!
//! # Seed default users, items and carts
//! cs-cli seed --file default.toml
//!
//! # Create or replace a user
//! cs-cli user create -e ivan@example.com -r manager -p test
//! ```
//!
//! Every command reads `STORE_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Corner Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed default data into the database
    Seed {
        /// Default-data TOML file; built-in users are used if it is missing
        #[arg(short, long, env = "STORE_DEFAULTS_PATH", default_value = "default.toml")]
        file: PathBuf,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user, replacing any user with the same email
    Create {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// User role (`user`, `manager`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Password; users without one cannot authenticate
        #[arg(short, long)]
        password: Option<String>,
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
        Commands::Seed { file } => commands::seed::defaults(&file).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                role,
                password,
            } => {
                commands::user::create(&email, &role, password.as_deref()).await?;
            }
        },
    }
    Ok(())
}
