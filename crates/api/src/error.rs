//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding. All route handlers return `Result<T, AppError>`, and
//! every error reaches the client as `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use meezy_core::api::ErrorResponse;

use crate::services::{AuthError, OrderError};
use crate::store::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error is the server's fault.
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Store(_)
                | Self::Order(OrderError::Repository(_))
                | Self::Auth(
                    AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning(_)
                )
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidRole(_)
                | AuthError::UserAlreadyExists
                | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
                AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Order(OrderError::EmptyCart) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Order(OrderError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to clients. Never exposes internal details.
    fn public_message(&self) -> String {
        if self.is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields(msg) => (*msg).to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::InvalidRole(_) => "Invalid role".to_string(),
                AuthError::UserAlreadyExists => "Email already exists".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::MissingToken => "Missing token".to_string(),
                _ => "Invalid token".to_string(),
            },
            Self::Order(err) => err.to_string(),
            Self::NotFound(_) => "Not found".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, body.error)
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 7".to_string());
        assert_eq!(err.to_string(), "Not found: product 7");
    }

    #[tokio::test]
    async fn test_validation_errors_are_400() {
        assert_eq!(
            render(AuthError::UserAlreadyExists.into()).await,
            (StatusCode::BAD_REQUEST, "Email already exists".to_string())
        );
        assert_eq!(
            render(AuthError::InvalidCredentials.into()).await,
            (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
        );
        assert_eq!(
            render(OrderError::EmptyCart.into()).await,
            (StatusCode::BAD_REQUEST, "Cart empty".to_string())
        );
    }

    #[tokio::test]
    async fn test_token_errors_are_401() {
        assert_eq!(
            render(AuthError::MissingToken.into()).await,
            (StatusCode::UNAUTHORIZED, "Missing token".to_string())
        );
        assert_eq!(
            render(AuthError::InvalidToken.into()).await,
            (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
        );
    }

    #[tokio::test]
    async fn test_not_found_hides_detail() {
        assert_eq!(
            render(AppError::NotFound("product abc".to_string())).await,
            (StatusCode::NOT_FOUND, "Not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_detail() {
        let (status, message) = render(RepositoryError::Exhausted("order").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");

        let (status, message) = render(AuthError::PasswordHash.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
