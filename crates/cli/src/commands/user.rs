//! Editor account management commands.
//!
//! The editor manages accounts too, but only for signed-in admins. These
//! commands are the out-of-band path: bootstrapping a fresh install, or
//! recovering a document nobody can sign in to any more.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! gb-cli user list
//!
//! # Add an operator account
//! gb-cli user add -u maria -p secret
//!
//! # Add an admin account
//! gb-cli user add -u chef -p secret -r admin
//!
//! # Remove an account
//! gb-cli user remove -u maria
//! ```
//!
//! # Environment Variables
//!
//! - `GASTROBOARD_DATA_PATH` - Document location (default:
//!   `gastroboard_data_v1.json`)

use thiserror::Error;

use gastroboard_core::{EditError, Role};
use gastroboard_server::store::StoreError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, operator")]
    InvalidRole(String),

    /// Account already exists.
    #[error("Account already exists with username: {0}")]
    UserExists(String),

    /// No account with the given username.
    #[error("No account with username: {0}")]
    NotFound(String),

    /// The edit was rejected by a document rule.
    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Writing the document failed.
    #[error("Failed to write document: {0}")]
    Store(#[from] StoreError),
}

/// Print all accounts in the document.
pub fn list() {
    dotenvy::dotenv().ok();

    let store = super::store_from_env();
    let config = store.load();

    tracing::info!("Accounts ({}):", config.users.len());
    for user in &config.users {
        tracing::info!("  {} ({})", user.username, user.role);
    }
}

/// Add an account with the given role.
///
/// # Arguments
///
/// * `username` - Username for signing in to the editor
/// * `password` - Password, stored as given
/// * `role` - Account role (`admin` or `operator`)
///
/// # Errors
///
/// Returns an error if the role is unknown, the username is taken, or the
/// document cannot be written.
pub async fn add(username: &str, password: &str, role: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    // Parse and validate role
    let role: Role = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let store = super::store_from_env();
    let mut config = store.load();

    let username = username.trim();

    // Check if the account already exists
    if config.users.iter().any(|user| user.username == username) {
        return Err(UserError::UserExists(username.to_owned()));
    }

    let id = config.add_user(username, password, role)?;
    store.save(&config).await?;

    tracing::info!(
        "Account created successfully! ID: {}, username: {}, role: {}",
        id,
        username,
        role
    );
    Ok(())
}

/// Remove the account with the given username.
///
/// The editor refuses to delete the signed-in account; there is no session
/// here, so any account can go, including the last admin.
///
/// # Errors
///
/// Returns an error if no account matches or the document cannot be written.
pub async fn remove(username: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let store = super::store_from_env();
    let mut config = store.load();

    let Some(index) = config
        .users
        .iter()
        .position(|user| user.username == username)
    else {
        return Err(UserError::NotFound(username.to_owned()));
    };

    let removed = config.users.remove(index);
    store.save(&config).await?;

    tracing::info!("Account removed: {} ({})", removed.username, removed.role);

    if removed.role.is_admin() && !config.users.iter().any(|user| user.role.is_admin()) {
        tracing::warn!("No admin accounts remain. Add one with 'gb-cli user add -r admin'.");
    }
    Ok(())
}
