//! Bearer token middleware and extractors.
//!
//! `require_auth` runs in front of every protected route. It verifies the
//! `Authorization: Bearer <token>` header and stores the claims in request
//! extensions, where handlers pick them up with [`RequireAuth`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, set_sentry_user};
use crate::services::{AuthError, Claims};
use crate::state::AppState;

/// Extract the raw token from an `Authorization` header value.
///
/// Returns `None` unless the value is a non-empty `Bearer` credential.
fn bearer_token(value: &HeaderValue) -> Option<&str> {
    value
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that rejects requests without a valid bearer token.
///
/// # Errors
///
/// Responds 401 `Missing token` when there is no `Authorization` header and
/// 401 `Invalid token` for any other scheme or a token that fails
/// verification.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;
    let token = bearer_token(header).ok_or(AuthError::InvalidToken)?;
    let claims = state.tokens().verify(token)?;

    tracing::Span::current().record("user_id", claims.id.as_i32());
    set_sentry_user(&claims.id, Some(claims.email.as_str()));

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extractor for the verified claims of the calling user.
///
/// Only usable on routes behind [`require_auth`]; elsewhere it rejects with
/// `Missing token`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(claims): RequireAuth) -> String {
///     format!("Hello, {}!", claims.name)
/// }
/// ```
pub struct RequireAuth(pub Claims);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        let cases = [
            ("Bearer abc.def.ghi", Some("abc.def.ghi")),
            ("Bearer ", None),
            ("Basic dXNlcjpwYXNz", None),
            ("abc.def.ghi", None),
        ];

        for (raw, expected) in cases {
            let value = HeaderValue::from_static(raw);
            assert_eq!(bearer_token(&value), expected, "{raw}");
        }
    }
}
