//! Integration tests for GastroBoard.
//!
//! Each test spawns the real server in-process on an OS-assigned port with a
//! throwaway document in a temp directory, then talks to it over HTTP the way
//! a TV or a browser would. Nothing external is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gastroboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `display_board` - TV slideshow rendering and advancing
//! - `admin_auth` - Sign-in, sessions, role gates
//! - `admin_editor` - Screen, category and dish editing
//! - `admin_users` - Account management
//! - `legacy_documents` - Migration of historical document shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use reqwest::Client;
use tempfile::TempDir;

use gastroboard_server::config::ServerConfig;
use gastroboard_server::state::AppState;
use gastroboard_server::store::ConfigStore;

/// One server instance spawned for one test.
///
/// Holds the store so tests can assert on the persisted document directly,
/// and keeps the temp directory alive for the duration of the test.
pub struct TestApp {
    pub base_url: String,
    pub store: ConfigStore,
    _data_dir: TempDir,
}

impl TestApp {
    /// Spawn the full router with a fresh document (the built-in board).
    ///
    /// # Panics
    ///
    /// Panics when the server cannot be started.
    pub async fn spawn() -> Self {
        Self::spawn_inner(None).await
    }

    /// Spawn the full router over the given raw document text.
    ///
    /// The text is written to the data path as-is before the server loads
    /// it, so historical shapes go through the real startup migration.
    ///
    /// # Panics
    ///
    /// Panics when the server cannot be started.
    pub async fn spawn_with_document(document: &str) -> Self {
        Self::spawn_inner(Some(document)).await
    }

    async fn spawn_inner(document: Option<&str>) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_path = data_dir.path().join("gastroboard_data_v1.json");
        if let Some(text) = document {
            std::fs::write(&data_path, text).expect("Failed to write seed document");
        }

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_path: data_path.clone(),
        };
        let store = ConfigStore::new(data_path);
        let app_config = store.load();
        let app = gastroboard_server::app(AppState::new(config, store.clone(), app_config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server died");
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
            _data_dir: data_dir,
        }
    }

    /// A cookie-keeping client, like a browser. Follows redirects.
    ///
    /// # Panics
    ///
    /// Panics when the client cannot be built.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// A cookie-keeping client that reports redirects instead of following
    /// them, for asserting on the redirects themselves.
    ///
    /// # Panics
    ///
    /// Panics when the client cannot be built.
    #[must_use]
    pub fn no_redirect_client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Sign in through the login form; the returned client holds the session.
    ///
    /// # Panics
    ///
    /// Panics when the credentials are rejected.
    pub async fn sign_in(&self, username: &str, password: &str) -> Client {
        let client = Self::client();
        let resp = client
            .post(format!("{}/admin/login", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to post login form");
        assert_eq!(resp.url().path(), "/admin", "login failed for {username}");
        client
    }

    /// A client signed in with the default admin account.
    ///
    /// # Panics
    ///
    /// Panics when the default credentials are rejected.
    pub async fn admin_client(&self) -> Client {
        self.sign_in("admin", "123").await
    }
}
