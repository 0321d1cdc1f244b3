//! Client workflows: account, catalogue, cart and checkout.
//!
//! A [`Shop`] pairs an [`ApiClient`] with the [`Session`] stored at a path.
//! Every operation that changes local state writes the state file before
//! returning.

use std::path::{Path, PathBuf};

use thiserror::Error;

use meezy_core::api::{LoginRequest, PlaceOrderRequest, RegisterRequest};
use meezy_core::{Cart, CartLine, Order, Product, ProductId, Role, UserProfile};

use crate::client::{ApiClient, ClientError};
use crate::session::{Session, SessionError};

/// Errors from client workflows.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Checkout attempted with nothing in the cart. Never reaches the server.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart lines could not be encoded as order items.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Registration details collected from the user.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

pub struct Shop {
    client: ApiClient,
    session: Session,
    path: PathBuf,
}

impl Shop {
    /// Load the session stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if the state file is unreadable.
    pub async fn open(client: ApiClient, path: impl Into<PathBuf>) -> Result<Self, ShopError> {
        let path = path.into();
        let session = Session::load(&path).await?;
        Ok(Self {
            client,
            session,
            path,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.session.cart
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<(), ShopError> {
        self.session.save(&self.path).await?;
        Ok(())
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns the server's validation message on rejection.
    pub async fn register(&mut self, registration: Registration) -> Result<UserProfile, ShopError> {
        let request = RegisterRequest {
            name: Some(registration.name),
            email: Some(registration.email),
            password: Some(registration.password),
            role: registration.role.map(|role| role.to_string()),
        };
        let response = self.client.register(&request).await?;
        let user = response.user.clone();

        self.session.sign_in(response);
        self.persist().await?;
        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `Invalid credentials` (from the server) on a bad login.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, ShopError> {
        let request = LoginRequest {
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
        };
        let response = self.client.login(&request).await?;
        let user = response.user.clone();

        self.session.sign_in(response);
        self.persist().await?;
        Ok(user)
    }

    /// Forget the stored token and user.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if the state file cannot be written.
    pub async fn logout(&mut self) -> Result<(), ShopError> {
        self.session.sign_out();
        self.persist().await
    }

    /// Refresh the stored user from `/me`.
    ///
    /// Returns `None` when signed out. A rejected token signs the session
    /// out before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Client` if the request fails.
    pub async fn refresh_me(&mut self) -> Result<Option<UserProfile>, ShopError> {
        let Some(token) = self.session.token() else {
            return Ok(None);
        };

        match self.client.me(token).await {
            Ok(user) => {
                self.session.user = Some(user.clone());
                self.persist().await?;
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::debug!(error = %e, "stored token rejected, signing out");
                self.session.sign_out();
                self.persist().await?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Client` if the request fails.
    pub async fn products(&self) -> Result<Vec<Product>, ShopError> {
        Ok(self.client.products().await?)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `Not found` (from the server) for an unknown id.
    pub async fn product(&self, id: ProductId) -> Result<Product, ShopError> {
        Ok(self.client.product(id).await?)
    }

    /// Add `qty` units of a product to the cart, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Client` if the product cannot be fetched.
    pub async fn add_to_cart(&mut self, id: ProductId, qty: u32) -> Result<Option<CartLine>, ShopError> {
        let product = self.client.product(id).await?;
        self.session.cart.add(&product, qty);
        self.persist().await?;
        Ok(self
            .session
            .cart
            .lines()
            .iter()
            .find(|line| line.product.id == id)
            .cloned())
    }

    /// Replace the cart with a single unit of one product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Client` if the product cannot be fetched.
    pub async fn buy_now(&mut self, id: ProductId) -> Result<Product, ShopError> {
        let product = self.client.product(id).await?;
        self.session.cart.replace_with(&product);
        self.persist().await?;
        Ok(product)
    }

    /// Drop a product's line. Returns `false` if it was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if the state file cannot be written.
    pub async fn remove_from_cart(&mut self, id: ProductId) -> Result<bool, ShopError> {
        let removed = self.session.cart.remove(id);
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Session` if the state file cannot be written.
    pub async fn clear_cart(&mut self) -> Result<(), ShopError> {
        self.session.cart.clear();
        self.persist().await
    }

    /// Send the cart as an order and clear it on success.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::EmptyCart` without contacting the server when the
    /// cart is empty. Returns the server's message (for example
    /// `Missing token` when signed out) if the order is rejected; the cart
    /// is left untouched in that case.
    pub async fn checkout(
        &mut self,
        address: Option<String>,
        payment: &str,
    ) -> Result<Order, ShopError> {
        if self.session.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let request = PlaceOrderRequest {
            items: Some(self.session.cart.to_order_items()?),
            address,
            payment: Some(payment.to_owned()),
        };
        let order = self
            .client
            .place_order(self.session.token(), &request)
            .await?;

        self.session.cart.clear();
        self.persist().await?;
        tracing::debug!(order_id = %order.id, "order placed, cart cleared");
        Ok(order)
    }
}
