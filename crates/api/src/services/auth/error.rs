//! Authentication error types.

use thiserror::Error;

use crate::store::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] meezy_core::EmailError),

    /// Unknown role name.
    #[error(transparent)]
    InvalidRole(#[from] meezy_core::RoleError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No `Authorization` header on a protected request.
    #[error("missing token")]
    MissingToken,

    /// Token is malformed, badly signed, expired, or names an unknown user.
    #[error("invalid token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token signing error: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Repository error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
