//! Account route handlers.

use axum::{Json, extract::State};

use meezy_core::UserProfile;
use meezy_core::api::{AuthResponse, LoginRequest, RegisterRequest};

use super::ApiJson;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::Authenticated;
use crate::state::AppState;

fn respond(Authenticated { user, token }: Authenticated) -> Json<AuthResponse> {
    Json(AuthResponse {
        token,
        user: user.profile(),
    })
}

/// Handle registration.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    Ok(respond(state.auth().register(&request).await?))
}

/// Handle login.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    Ok(respond(state.auth().login(&request).await?))
}

/// Return the profile of the token's owner.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<UserProfile>> {
    let user = state.auth().current_user(&claims).await?;
    Ok(Json(user.profile()))
}
