//! Meezy Core - Shared types library.
//!
//! This crate provides the types shared by the Meezy components:
//! - `api` - The HTTP/JSON API server
//! - `cli` - The command-line shopping client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP
//! clients. Both the server and the client serialize these exact types, so
//! the wire format is defined once.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and roles, plus the
//!   product, order, profile and cart models
//! - [`api`] - Request and response payloads of the `/api` endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
