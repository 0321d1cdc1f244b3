//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{OrderId, UserId};

/// An order created at checkout.
///
/// `items` are stored exactly as the client sent them; the server does not
/// re-validate them against the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(4),
            items: vec![json!({"id": 1, "qty": 2})],
            address: Some("12 MG Road".to_owned()),
            payment: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["userId"], 4);
        assert_eq!(value["items"][0]["qty"], 2);
        assert!(value.get("payment").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
