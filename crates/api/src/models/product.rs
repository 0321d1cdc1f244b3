//! Catalogue records and seeding.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use meezy_core::{Price, Product, ProductId};

use crate::store::Record;

/// A catalogue entry before it has an id.
///
/// This is also the element type of a `MEEZY_PRODUCTS_FILE` catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Price,
    pub seller: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Product {
    type Id = ProductId;
    type Draft = NewProduct;

    const KIND: &'static str = "product";

    fn id(&self) -> ProductId {
        self.id
    }

    fn from_draft(id: ProductId, draft: NewProduct) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            seller: draft.seller,
            description: draft.description,
        }
    }
}

/// Errors loading a catalogue file.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalogue {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The built-in catalogue used when no products file is configured.
#[must_use]
pub fn default_catalogue() -> Vec<NewProduct> {
    vec![
        NewProduct {
            title: "Product 1".to_owned(),
            price: Price::from_major(100),
            seller: "Alice".to_owned(),
            description: "Specs of Product 1".to_owned(),
        },
        NewProduct {
            title: "Product 2".to_owned(),
            price: Price::from_major(200),
            seller: "Bob".to_owned(),
            description: "Specs of Product 2".to_owned(),
        },
    ]
}

/// Read a catalogue from a JSON array of products (without ids).
///
/// # Errors
///
/// Returns `CatalogueError` if the file cannot be read or parsed.
pub async fn load_catalogue(path: &Path) -> Result<Vec<NewProduct>, CatalogueError> {
    let display = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogueError::Io {
            path: display.clone(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| CatalogueError::Parse {
        path: display,
        source,
    })
}
