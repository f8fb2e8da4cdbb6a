//! Persistence of the configuration document.
//!
//! One JSON file per install. Loading is tolerant: a missing or unreadable
//! document falls back to the built-in board, and any readable document goes
//! through [`gastroboard_core::migrate`] so historical shapes keep working.
//! Saving writes the current shape atomically (temp file + rename), which is
//! what implicitly persists a migration on the first edit after an upgrade.

use std::path::{Path, PathBuf};

use thiserror::Error;

use gastroboard_core::{AppConfig, defaults, migrate};

/// Failure writing the configuration document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed store for the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and migrate the document. Never fails: the display must come up
    /// even when the document is missing or damaged.
    #[must_use]
    pub fn load(&self) -> AppConfig {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "no configuration document yet, starting with the built-in board"
                );
                return defaults::default_config();
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read configuration document, using the built-in board"
                );
                return defaults::default_config();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => {
                if !value.is_object() {
                    tracing::warn!(
                        path = %self.path.display(),
                        "configuration document is not a JSON object, using the built-in board"
                    );
                }
                migrate::migrate(value)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "configuration document is not valid JSON, using the built-in board"
                );
                defaults::default_config()
            }
        }
    }

    /// Write the document atomically, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or any filesystem step fails.
    /// The previous document stays intact in that case.
    pub async fn save(&self, config: &AppConfig) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
