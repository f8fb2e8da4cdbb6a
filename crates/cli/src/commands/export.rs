//! Print the configuration document after migration.
//!
//! Useful for inspecting what the server will actually serve: the document on
//! disk may be in a historical shape, and this prints the migrated form.
//!
//! # Usage
//!
//! ```bash
//! # Compact JSON, for piping into jq and friends
//! gb-cli export
//!
//! # Human-readable JSON
//! gb-cli export --pretty
//! ```
//!
//! # Environment Variables
//!
//! - `GASTROBOARD_DATA_PATH` - Document location (default:
//!   `gastroboard_data_v1.json`)

use thiserror::Error;

/// Errors that can occur while exporting the document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serializing the migrated document failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load, migrate and print the document as JSON on stdout.
pub fn run(pretty: bool) -> Result<(), ExportError> {
    dotenvy::dotenv().ok();

    let store = super::store_from_env();
    let config = store.load();

    let json = if pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }

    Ok(())
}
