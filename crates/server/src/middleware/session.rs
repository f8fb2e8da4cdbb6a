//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Sessions are not
//! persisted across restarts; operators sign in again, which is fine for a
//! single-venue install.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gb_session";

/// Create the session layer with in-memory store.
///
/// The panel is served over plain HTTP on the venue network, so the cookie
/// is not marked secure.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
