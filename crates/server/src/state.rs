//! Shared application state.
//!
//! The whole configuration document lives in memory behind an `Arc` swap.
//! Reads take a cheap snapshot; edits are serialized through a single async
//! lock and are persisted before they become visible to readers.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

use gastroboard_core::{AppConfig, EditError};

use crate::{config::ServerConfig, error::Result, store::ConfigStore};

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: ConfigStore,
    app_config: RwLock<Arc<AppConfig>>,
    version: AtomicU64,
    edit_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    /// Create the state from the server config, the store and the document
    /// the store loaded at startup.
    #[must_use]
    pub fn new(config: ServerConfig, store: ConfigStore, app_config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                app_config: RwLock::new(Arc::new(app_config)),
                version: AtomicU64::new(1),
                edit_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Server configuration (bind address, data path).
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Snapshot of the current configuration document.
    ///
    /// The snapshot stays consistent while the request renders; the next
    /// request picks up any edits that landed in between.
    #[must_use]
    pub fn current(&self) -> Arc<AppConfig> {
        self.inner
            .app_config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Version counter of the configuration, bumped on every saved edit.
    ///
    /// Display pages poll this and reload once it changes.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Relaxed)
    }

    /// Apply an edit to the configuration document.
    ///
    /// Edits run one at a time. The mutation works on a copy of the current
    /// document; the copy is persisted first and published to readers only
    /// after the write succeeded, so a failed save leaves the in-memory
    /// document untouched.
    pub async fn update<T>(
        &self,
        mutate: impl FnOnce(&mut AppConfig) -> std::result::Result<T, EditError>,
    ) -> Result<T> {
        let _guard = self.inner.edit_lock.lock().await;

        let mut next = (*self.current()).clone();
        let value = mutate(&mut next)?;
        self.inner.store.save(&next).await?;

        *self
            .inner
            .app_config
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
        self.inner.version.fetch_add(1, Ordering::Relaxed);

        Ok(value)
    }
}
