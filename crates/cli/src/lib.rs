//! Meezy storefront client.
//!
//! The typed API client, the local session file, and the shopping
//! workflows built on them. The `meezy` binary is a thin clap front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod session;
pub mod shop;

pub use client::{ApiClient, ClientError, DEFAULT_API_URL};
pub use session::{DEFAULT_STATE_FILE, Session, SessionError};
pub use shop::{Registration, Shop, ShopError};
