//! Catalogue route handlers.

use axum::{Json, extract::State};

use meezy_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::routes::ApiPath;
use crate::state::AppState;

/// List the whole catalogue.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().products().list().await?))
}

/// Show one product. Ids that are not numbers, or not even UTF-8, are simply
/// not found.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Product>> {
    let not_found = || AppError::NotFound(format!("product {id}"));

    let product_id: ProductId = id.parse().map_err(|_| not_found())?;
    state
        .store()
        .products()
        .get(product_id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}
