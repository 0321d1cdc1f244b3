//! Business logic layer.
//!
//! Services sit between route handlers and the [`Store`](crate::store::Store):
//! they validate input, enforce invariants, and turn storage results into
//! domain errors. Handlers stay thin and only translate to and from HTTP.

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService, Authenticated, Claims, TokenService};
pub use orders::{OrderError, OrderService};
