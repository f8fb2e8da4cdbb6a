//! GastroBoard Server - Restaurant signage.
//!
//! This binary serves both halves of the system on port 3000:
//!
//! - The TV display: a self-driving slideshow of menu boards and promo
//!   slides, open without authentication.
//! - The admin panel under `/admin`: a password-protected editor for
//!   screens, dishes, promos, and accounts.
//!
//! # Architecture
//!
//! - Axum web framework with plain form posts (no client framework)
//! - Askama templates for server-side rendering
//! - A single JSON document on disk as the whole data store
//! - tower-sessions (in-memory) for admin sign-in

#![cfg_attr(not(test), forbid(unsafe_code))]

use gastroboard_server::config::ServerConfig;
use gastroboard_server::state::AppState;
use gastroboard_server::store::ConfigStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gastroboard_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Load (or seed) the configuration document
    let store = ConfigStore::new(config.data_path.clone());
    let app_config = store.load();
    tracing::info!(
        "Loaded {} screens and {} users from {}",
        app_config.screens.len(),
        app_config.users.len(),
        store.path().display()
    );

    let addr = config.socket_addr();
    let state = AppState::new(config, store, app_config);
    let app = gastroboard_server::app(state);

    tracing::info!("signage server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
