//! HTTP route handlers for the signage server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /         - TV slideshow (renders the screen at the query cursor)
//! GET  /next     - Advance the cursor, redirect back to /
//! GET  /version  - Config version for the reload poll (JSON)
//! GET  /health   - Health check
//!
//! # Auth
//! GET  /admin/login   - Login page
//! POST /admin/login   - Login action
//! POST /admin/logout  - Logout action
//!
//! # Editor (requires sign-in)
//! GET  /admin                        - Editor, ?screen=<id> picks the open screen
//! POST /admin/screens                - Add a screen
//! POST /admin/screens/{id}/update    - Save screen settings
//! POST /admin/screens/{id}/promo     - Save promo content
//! POST /admin/screens/{id}/move      - Reorder screen
//! POST /admin/screens/{id}/delete    - Delete screen
//! POST /admin/screens/{id}/categories                        - Add category
//! POST /admin/screens/{id}/categories/{cat}/rename           - Rename category
//! POST /admin/screens/{id}/categories/{cat}/delete           - Delete category
//! POST /admin/screens/{id}/categories/{cat}/dishes           - Add dish
//! POST /admin/screens/{id}/categories/{cat}/dishes/{dish}/update - Save dish
//! POST /admin/screens/{id}/categories/{cat}/dishes/{dish}/delete - Delete dish
//! POST /admin/settings               - Save global settings
//!
//! # Users (requires admin role)
//! GET  /admin/users                  - User management page
//! POST /admin/users                  - Add user
//! POST /admin/users/{id}/update      - Change role / reset password
//! POST /admin/users/{id}/delete      - Delete user
//! ```

pub mod admin;
pub mod auth;
pub mod display;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the public display routes router.
pub fn display_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(display::board))
        .route("/next", get(display::next))
        .route("/version", get(display::version))
}

/// Create the admin routes router (auth, editor, users).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/", get(admin::editor))
        .route("/screens", post(admin::add_screen))
        .route("/screens/{id}/update", post(admin::update_screen))
        .route("/screens/{id}/promo", post(admin::update_promo))
        .route("/screens/{id}/move", post(admin::move_screen))
        .route("/screens/{id}/delete", post(admin::delete_screen))
        .route("/screens/{id}/categories", post(admin::add_category))
        .route(
            "/screens/{id}/categories/{category_id}/rename",
            post(admin::rename_category),
        )
        .route(
            "/screens/{id}/categories/{category_id}/delete",
            post(admin::delete_category),
        )
        .route(
            "/screens/{id}/categories/{category_id}/dishes",
            post(admin::add_dish),
        )
        .route(
            "/screens/{id}/categories/{category_id}/dishes/{dish_id}/update",
            post(admin::update_dish),
        )
        .route(
            "/screens/{id}/categories/{category_id}/dishes/{dish_id}/delete",
            post(admin::delete_dish),
        )
        .route("/settings", post(admin::update_settings))
        .route("/users", get(admin::users_page).post(admin::add_user))
        .route("/users/{id}/update", post(admin::update_user))
        .route("/users/{id}/delete", post(admin::delete_user))
}

/// Create all routes for the signage server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(display_routes())
        .nest("/admin", admin_routes())
}
