//! Request and response bodies for the `/api` endpoints.
//!
//! Request fields are optional so a missing field reaches the handler and
//! is reported with the endpoint's own validation message instead of a
//! generic deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Order, UserProfile};

/// `POST /api/register` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// `POST /api/login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// `POST /api/orders` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceOrderRequest {
    pub items: Option<Vec<Value>>,
    pub address: Option<String>,
    pub payment: Option<String>,
}

/// Successful order placement response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
