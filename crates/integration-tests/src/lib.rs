//! Integration tests for Meezy.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p meezy-integration-tests
//! ```
//!
//! No external services are needed: HTTP contract tests drive the router
//! in-process, and client tests start a real server on an ephemeral port.
//!
//! # Test Categories
//!
//! - `api_auth` - Registration, login, `/me`
//! - `api_catalogue` - Products, health, request ids, fallbacks
//! - `api_orders` - Order placement and concurrency
//! - `client_flow` - The `meezy-cli` library against a live server

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use meezy_api::config::ApiConfig;
use meezy_api::models::default_catalogue;
use meezy_api::store::Store;
use meezy_api::{AppState, app};

/// Signing secret shared by every test server.
pub const TEST_SECRET: &str = "k7#Vq9!zR2@mW4$xT8^bN1&cL6*pH3+d";

/// Default test configuration.
#[must_use]
pub fn test_config() -> ApiConfig {
    ApiConfig::with_secret(SecretString::from(TEST_SECRET))
}

/// Fresh state with the built-in catalogue.
pub async fn state_with(config: ApiConfig) -> AppState {
    let store = Store::in_memory(default_catalogue()).await.unwrap();
    AppState::new(config, store)
}

/// Fresh state with the default test configuration.
pub async fn test_state() -> AppState {
    state_with(test_config()).await
}

/// A decoded response. Non-JSON bodies become `Value::String`.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Send a prepared request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Build and send a request with an optional bearer token and JSON body.
pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// Register an account and return its token.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let body = serde_json::json!({"name": name, "email": email, "password": password});
    let response = call(app, Method::POST, "/api/register", None, Some(&body)).await;
    assert_eq!(response.status, StatusCode::OK, "register failed: {:?}", response.body);
    response.body["token"].as_str().unwrap().to_owned()
}

/// A server listening on an ephemeral local port.
pub struct TestServer {
    pub api_url: String,
    pub state: AppState,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve the app in a background task.
    pub async fn spawn() -> Self {
        let state = test_state().await;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            api_url: format!("http://{addr}/api"),
            state,
        }
    }
}
