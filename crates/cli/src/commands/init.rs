//! Seed a fresh configuration document.
//!
//! # Usage
//!
//! ```bash
//! # Create the document with the built-in board and default accounts
//! gb-cli init
//!
//! # Replace an existing document
//! gb-cli init --force
//! ```
//!
//! # Environment Variables
//!
//! - `GASTROBOARD_DATA_PATH` - Document location (default:
//!   `gastroboard_data_v1.json`)

use thiserror::Error;

use gastroboard_core::defaults;
use gastroboard_server::store::StoreError;

/// Errors that can occur while seeding the document.
#[derive(Debug, Error)]
pub enum InitError {
    /// The document is already present and `--force` was not given.
    #[error("Document already exists at {0} (pass --force to overwrite)")]
    AlreadyExists(String),

    /// Writing the document failed.
    #[error("Failed to write document: {0}")]
    Store(#[from] StoreError),
}

/// Write the built-in board and default accounts to the document path.
pub async fn run(force: bool) -> Result<(), InitError> {
    dotenvy::dotenv().ok();

    let store = super::store_from_env();

    if store.path().exists() && !force {
        return Err(InitError::AlreadyExists(
            store.path().display().to_string(),
        ));
    }

    let config = defaults::default_config();
    store.save(&config).await?;

    tracing::info!(
        "Seeded configuration document at {}",
        store.path().display()
    );
    tracing::info!(
        "  Screens: {}, accounts: {}",
        config.screens.len(),
        config.users.len()
    );
    tracing::warn!("Default credentials are admin/123; change them in the editor.");
    Ok(())
}
