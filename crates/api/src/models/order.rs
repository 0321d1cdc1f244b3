//! Order records.

use chrono::Utc;
use serde_json::Value;

use meezy_core::{Order, OrderId, UserId};

use crate::store::Record;

/// An accepted checkout, ready to insert.
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<Value>,
    pub address: Option<String>,
    pub payment: Option<String>,
}

impl Record for Order {
    type Id = OrderId;
    type Draft = NewOrder;

    const KIND: &'static str = "order";

    fn id(&self) -> OrderId {
        self.id
    }

    fn from_draft(id: OrderId, draft: NewOrder) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            items: draft.items,
            address: draft.address,
            payment: draft.payment,
            created_at: Utc::now(),
        }
    }
}
