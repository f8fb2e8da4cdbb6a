//! GastroBoard CLI - Configuration document management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed a fresh configuration document
//! gb-cli init
//!
//! # Print the document after migration
//! gb-cli export --pretty
//!
//! # Manage editor accounts
//! gb-cli user list
//! gb-cli user add -u maria -p secret
//! gb-cli user add -u chef -p secret -r admin
//! gb-cli user remove -u maria
//! ```
//!
//! # Commands
//!
//! - `init` - Seed a fresh configuration document
//! - `export` - Print the migrated document as JSON
//! - `user` - List, add and remove editor accounts
//!
//! All commands work on the document named by `GASTROBOARD_DATA_PATH`. The
//! server reads that document once at startup, so restart it after editing
//! accounts from the shell.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gb-cli")]
#[command(author, version, about = "GastroBoard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a fresh configuration document
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration document after migration
    Export {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Manage editor accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List editor accounts
    List,
    /// Add an editor account
    Add {
        /// Username for signing in to the editor
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Account role (`admin` or `operator`)
        #[arg(short, long, default_value = "operator")]
        role: String,
    },
    /// Remove an editor account
    Remove {
        /// Username of the account to remove
        #[arg(short, long)]
        username: String,
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
        Commands::Init { force } => commands::init::run(force).await?,
        Commands::Export { pretty } => commands::export::run(pretty)?,
        Commands::User { action } => match action {
            UserAction::List => commands::user::list(),
            UserAction::Add {
                username,
                password,
                role,
            } => {
                commands::user::add(&username, &password, &role).await?;
            }
            UserAction::Remove { username } => commands::user::remove(&username).await?,
        },
    }
    Ok(())
}
