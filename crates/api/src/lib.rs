//! Meezy API library.
//!
//! The HTTP/JSON server behind the Meezy storefront: accounts with bearer
//! tokens, a read-only catalogue, and order capture. Exposed as a library so
//! the router can be exercised in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
