//! Core types for Meezy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod role;
pub mod user;

pub use cart::{Cart, CartLine};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::Order;
pub use price::{CURRENCY_SYMBOL, Price};
pub use product::Product;
pub use role::{Role, RoleError};
pub use user::UserProfile;
