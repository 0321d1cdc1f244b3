//! HTTP client for the Meezy API.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use meezy_core::api::{
    AuthResponse, ErrorResponse, LoginRequest, OrderResponse, PlaceOrderRequest, RegisterRequest,
};
use meezy_core::{Order, Product, ProductId, UserProfile};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response. Displays the server's message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether the server rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == StatusCode::UNAUTHORIZED.as_u16())
    }
}

/// Thin typed wrapper over the `/api` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (for example
    /// `http://localhost:4000/api`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's message on rejection.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        send(self.client.post(self.url("/register")).json(request)).await
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's message on rejection.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        send(self.client.post(self.url("/login")).json(request)).await
    }

    /// Fetch the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (401) if the token is missing or invalid.
    pub async fn me(&self, token: &str) -> Result<UserProfile, ClientError> {
        send(self.client.get(self.url("/me")).bearer_auth(token)).await
    }

    /// List the catalogue.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        send(self.client.get(self.url("/products"))).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (404) for an unknown id.
    pub async fn product(&self, id: ProductId) -> Result<Product, ClientError> {
        send(self.client.get(self.url(&format!("/products/{id}")))).await
    }

    /// Place an order. Sent without credentials when `token` is `None`, in
    /// which case the server answers `Missing token`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's message on rejection.
    pub async fn place_order(
        &self,
        token: Option<&str>,
        request: &PlaceOrderRequest,
    ) -> Result<Order, ClientError> {
        let mut builder = self.client.post(self.url("/orders")).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let response: OrderResponse = send(builder).await?;
        Ok(response.order)
    }
}

/// Send a request and decode a JSON success body, or turn the `{"error"}`
/// body of a failure into `ClientError::Api`.
async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
    let response = builder.send().await?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text).map_or(text, |body| body.error);
        tracing::debug!(status = status.as_u16(), %message, "api request rejected");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}
