//! Storage for users, products and orders.
//!
//! Handlers never touch a concrete backend. They go through [`Store`], which
//! bundles one [`Collection`] per record type behind `Arc<dyn ...>`, so a
//! persistent backend can replace [`MemoryCollection`] without changing any
//! route or service code.
//!
//! # Collections
//!
//! - `users` - Registered accounts (unique by email)
//! - `products` - The catalogue, seeded at startup
//! - `orders` - Orders placed at checkout
//!
//! Ids are assigned by the collection on insert: one more than the number of
//! records already stored, starting at 1.

mod memory;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use meezy_core::{Order, Product};

use crate::models::product::NewProduct;
use crate::models::user::User;

pub use memory::MemoryCollection;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// No id left to assign.
    #[error("{0} collection is full")]
    Exhausted(&'static str),
}

/// A record that can live in a [`Collection`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Sequential integer id type.
    type Id: Copy + Eq + Send + Sync + Display + From<i32>;
    /// Everything needed to create the record except its id.
    type Draft: Send;

    /// Collection name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Build the stored record once an id has been assigned.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Whether inserting `draft` would violate a uniqueness rule held by
    /// this record. Checked under the same lock as the insert.
    fn conflicts_with(&self, _draft: &Self::Draft) -> bool {
        false
    }
}

/// Borrowed search predicate for [`Collection::find`].
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Storage capabilities shared by every record type.
#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    /// Assign the next id and store the record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an existing record conflicts
    /// with the draft.
    async fn insert(&self, draft: T::Draft) -> Result<T, RepositoryError>;

    /// Look a record up by id.
    async fn get(&self, id: T::Id) -> Result<Option<T>, RepositoryError>;

    /// First record matching `predicate`, in insertion order.
    async fn find(&self, predicate: Predicate<'_, T>) -> Result<Option<T>, RepositoryError>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<T>, RepositoryError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// The three collections the API works with.
///
/// Cheap to clone; clones share the same underlying collections.
#[derive(Clone)]
pub struct Store {
    users: Arc<dyn Collection<User>>,
    products: Arc<dyn Collection<Product>>,
    orders: Arc<dyn Collection<Order>>,
}

impl Store {
    /// Assemble a store from arbitrary collection backends.
    #[must_use]
    pub fn new(
        users: Arc<dyn Collection<User>>,
        products: Arc<dyn Collection<Product>>,
        orders: Arc<dyn Collection<Order>>,
    ) -> Self {
        Self {
            users,
            products,
            orders,
        }
    }

    /// Create an in-memory store with the given catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue cannot be inserted.
    pub async fn in_memory(catalogue: Vec<NewProduct>) -> Result<Self, RepositoryError> {
        let products = MemoryCollection::<Product>::new();
        for product in catalogue {
            products.insert(product).await?;
        }

        Ok(Self::new(
            Arc::new(MemoryCollection::<User>::new()),
            Arc::new(products),
            Arc::new(MemoryCollection::<Order>::new()),
        ))
    }

    #[must_use]
    pub fn users(&self) -> &dyn Collection<User> {
        self.users.as_ref()
    }

    #[must_use]
    pub fn products(&self) -> &dyn Collection<Product> {
        self.products.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &dyn Collection<Order> {
        self.orders.as_ref()
    }
}
