//! Stored records and the drafts used to create them.
//!
//! Products and orders are stored as their `meezy_core` wire types. Users
//! get their own type here because the stored record holds the password
//! hash, which never leaves the server.

pub mod order;
pub mod product;
pub mod user;

pub use order::NewOrder;
pub use product::{CatalogueError, NewProduct, default_catalogue, load_catalogue};
pub use user::{NewUser, User};
