//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Auth
//! POST /api/register           - Create account, returns token + profile
//! POST /api/login              - Sign in, returns token + profile
//! GET  /api/me                 - Current profile (requires auth)
//!
//! # Catalogue
//! GET  /api/products           - Product listing
//! GET  /api/products/{id}      - Product detail
//!
//! # Orders (requires auth)
//! POST /api/orders             - Place an order from the client cart
//! ```

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderValue, Method, header},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::middleware::{request_id_middleware, require_auth};
use crate::state::AppState;

/// JSON body extractor whose rejections use the API's `{"error": ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections are JSON 404s.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the `/api` router.
///
/// Routes registered before the `route_layer` call are public; the rest sit
/// behind [`require_auth`].
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/orders", post(orders::place))
        .route_layer(from_fn_with_state(state, require_auth))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes(state.clone()))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
                user_id = tracing::field::Empty,
            )
        }))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Permissive CORS unless an origin allow-list is configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(%origin, "ignoring unparseable CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(request: Request) -> AppError {
    AppError::NotFound(request.uri().path().to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ApiConfig;
    use crate::store::Store;

    async fn restricted_app() -> Router {
        let mut config = ApiConfig::with_secret(SecretString::from("k7#Vq9!zR2@mW4$xT8^bN1&cL6*pH3+d"));
        config.cors_origins = vec!["https://shop.meezy.in".to_owned()];
        app(AppState::new(config, Store::in_memory(Vec::new()).await.unwrap()))
    }

    async fn allow_origin_for(app: Router, origin: &str) -> Option<HeaderValue> {
        let request = Request::builder()
            .uri("/api/products")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let app = restricted_app().await;

        assert_eq!(
            allow_origin_for(app.clone(), "https://shop.meezy.in").await.unwrap(),
            "https://shop.meezy.in"
        );
        assert!(allow_origin_for(app, "https://evil.example").await.is_none());
    }
}
