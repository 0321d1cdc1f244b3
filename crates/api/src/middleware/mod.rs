//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with `request_id` and `user_id` fields)
//! 3. Request ID (reuse or generate, echo in response)
//! 4. CORS
//! 5. Bearer auth (protected routes only)

pub mod auth;
pub mod request_id;

pub use auth::{RequireAuth, require_auth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
