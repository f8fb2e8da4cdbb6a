//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapped to HTTP statuses. All fallible
//! route handlers return `Result<T, AppError>`; internal details are logged,
//! never sent to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use gastroboard_core::EditError;

use crate::store::StoreError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An edit addressed an entity that no longer exists or does not apply.
    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Writing the configuration document failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Edit(err) => match err {
                EditError::ScreenNotFound
                | EditError::CategoryNotFound
                | EditError::DishNotFound
                | EditError::UserNotFound => StatusCode::NOT_FOUND,
                EditError::UsernameTaken => StatusCode::CONFLICT,
                EditError::NotAMenuScreen
                | EditError::NotAPromoScreen
                | EditError::MissingCredentials
                | EditError::OwnAccount => StatusCode::BAD_REQUEST,
            },
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("screen".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_edit_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(AppError::Edit(EditError::ScreenNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Edit(EditError::UsernameTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Edit(EditError::OwnAccount)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = AppError::Internal("secret path /etc/x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
