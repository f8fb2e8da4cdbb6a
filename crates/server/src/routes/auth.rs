//! Authentication route handlers.
//!
//! Checks submitted credentials against the user list in the configuration
//! document and keeps the signed-in user in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::session::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Map an `?error=` key to the message shown on the login page.
fn error_message(key: &str) -> String {
    match key {
        "credentials" => "Неверный логин или пароль".to_string(),
        "session" => "Не удалось создать сессию, попробуйте ещё раз".to_string(),
        _ => "Не удалось войти".to_string(),
    }
}

// =============================================================================
// Auth Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let config = state.current();

    match config.authenticate(form.username.trim(), &form.password) {
        Some(user) => {
            let current = CurrentUser::from(user);
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/admin/login?error=session").into_response();
            }
            Redirect::to("/admin").into_response()
        }
        None => {
            tracing::warn!("Failed login attempt for username {:?}", form.username);
            Redirect::to("/admin/login?error=credentials").into_response()
        }
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/admin/login").into_response()
}
