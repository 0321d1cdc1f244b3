//! Catalogue products.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Display name of the seller (not a user reference).
    pub seller: String,
    #[serde(default)]
    pub description: String,
}
