//! Client-side shopping cart.
//!
//! The cart never exists on the server. Clients keep it next to their
//! token, mutate it locally, and send its lines as the `items` of
//! `POST /api/orders` at checkout. Each line is a snapshot of the product
//! as it was when added, plus a quantity, which is also the shape the
//! server stores inside the order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Price, Product, ProductId};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub qty: u32,
}

impl CartLine {
    /// Price of the line (unit price times quantity).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.qty)
    }
}

/// A list of cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `qty` units of a product, merging with an existing line.
    ///
    /// Adding zero units is a no-op.
    pub fn add(&mut self, product: &Product, qty: u32) {
        if qty == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.qty = line.qty.saturating_add(qty);
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                qty,
            });
        }
    }

    /// Drop the line for a product. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != id);
        self.lines.len() != before
    }

    /// Replace the whole cart with a single unit of one product ("buy now").
    pub fn replace_with(&mut self, product: &Product) {
        self.lines.clear();
        self.add(product, 1);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.qty)).sum()
    }

    /// Sum of every line's subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The lines as JSON objects, ready to send as order items.
    ///
    /// # Errors
    ///
    /// Returns an error if a line fails to serialize.
    pub fn to_order_items(&self) -> Result<Vec<Value>, serde_json::Error> {
        self.lines.iter().map(serde_json::to_value).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_major(price),
            seller: "Alice".to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);
        cart.add(&product(1, 100), 1);
        cart.add(&product(2, 200), 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_major(400));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 2);
        assert!(!cart.remove(ProductId::new(9)));
        assert!(cart.remove(ProductId::new(1)));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_replace_with_keeps_single_unit() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 3);
        cart.replace_with(&product(2, 200));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Price::from_major(200));
    }

    #[test]
    fn test_order_items_flatten_product_fields() {
        let mut cart = Cart::new();
        cart.add(&product(2, 200), 2);

        let items = cart.to_order_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], 2);
        assert_eq!(items[0]["price"], 200);
        assert_eq!(items[0]["qty"], 2);
    }

    #[test]
    fn test_persisted_form_is_a_plain_array() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
