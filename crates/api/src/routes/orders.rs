//! Order route handlers.

use axum::{Json, extract::State};

use meezy_core::api::{OrderResponse, PlaceOrderRequest};

use super::ApiJson;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Place an order for the authenticated user.
#[tracing::instrument(skip_all)]
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    ApiJson(request): ApiJson<PlaceOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state.orders().place(claims.id, request).await?;
    Ok(Json(OrderResponse { order }))
}
