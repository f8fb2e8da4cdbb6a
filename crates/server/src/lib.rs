//! GastroBoard Server library.
//!
//! This crate provides the signage server as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires [`app`] to a TCP
//! listener; integration tests spawn the same router on an ephemeral port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use axum::{Router, response::Redirect, routing::get};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with all routes and middleware.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/server/static"))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(session_layer),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Unknown paths go back to the display.
async fn fallback() -> Redirect {
    Redirect::to("/")
}
