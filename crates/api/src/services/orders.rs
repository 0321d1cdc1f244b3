//! Order placement.

use thiserror::Error;

use meezy_core::api::PlaceOrderRequest;
use meezy_core::{Order, UserId};

use crate::models::NewOrder;
use crate::store::{RepositoryError, Store};

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// `items` was missing or empty.
    #[error("Cart empty")]
    EmptyCart,

    /// Repository error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Creates orders for authenticated users.
///
/// Items are opaque client payloads: no stock is reserved, no prices are
/// recomputed, and `payment` is stored as a label only.
pub struct OrderService<'a> {
    store: &'a Store,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Append a new order owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` (and stores nothing) if there are no
    /// items.
    pub async fn place(
        &self,
        user_id: UserId,
        request: PlaceOrderRequest,
    ) -> Result<Order, OrderError> {
        let items = request
            .items
            .filter(|items| !items.is_empty())
            .ok_or(OrderError::EmptyCart)?;

        let order = self
            .store
            .orders()
            .insert(NewOrder {
                user_id,
                items,
                address: request.address,
                payment: request.payment,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = order.items.len(),
            payment = order.payment.as_deref().unwrap_or("-"),
            "order placed"
        );
        Ok(order)
    }
}
