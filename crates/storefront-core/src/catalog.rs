//! Product catalog endpoints and payload parsing.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fetch::{FetchError, JsonSource, Loader};
use crate::product::{Product, normalize_product};

/// Known public catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogEndpoint {
    /// DummyJSON, first 50 products
    #[default]
    DummyJson,
    /// DummyJSON, one category
    DummyJsonCategory(String),
    /// Platzi fake store
    Platzi,
    /// FakeStore API
    FakeStore,
    /// Any other listing URL
    Custom(String),
}

impl CatalogEndpoint {
    pub fn url(&self) -> String {
        match self {
            CatalogEndpoint::DummyJson => "https://dummyjson.com/products?limit=50".to_string(),
            CatalogEndpoint::DummyJsonCategory(category) => {
                format!("https://dummyjson.com/products/category/{category}")
            }
            CatalogEndpoint::Platzi => "https://api.escuelajs.co/api/v1/products".to_string(),
            CatalogEndpoint::FakeStore => "https://fakestoreapi.com/products".to_string(),
            CatalogEndpoint::Custom(url) => url.clone(),
        }
    }
}

impl fmt::Display for CatalogEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Turn a listing payload into normalized products.
///
/// Accepts `{ "products": [...] }` or a bare array. Records that fail
/// normalization, or repeat an id seen earlier in the payload, are skipped.
pub fn parse_catalog(payload: &Value) -> Result<Vec<Product>, FetchError> {
    let records = match payload {
        Value::Array(records) => records,
        Value::Object(obj) => match obj.get("products") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(FetchError::Malformed(
                    "expected a product list or an object with `products`".to_string(),
                ));
            }
        },
        _ => {
            return Err(FetchError::Malformed(
                "expected a product list or an object with `products`".to_string(),
            ));
        }
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match normalize_product(record) {
            Ok(product) => {
                if seen.insert(product.id) {
                    products.push(product);
                } else {
                    warn!(index, id = product.id, "Skipping product with duplicate id");
                }
            }
            Err(e) => warn!(index, error = %e, "Skipping product record"),
        }
    }

    debug!(received = records.len(), kept = products.len(), "Parsed catalog");
    Ok(products)
}

/// Fetches and normalizes product listings from a [`JsonSource`].
#[derive(Debug, Clone)]
pub struct CatalogClient<S> {
    source: Arc<S>,
}

impl<S: JsonSource> CatalogClient<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// One read of `url`, normalized.
    pub async fn fetch_products(&self, url: &str) -> Result<Vec<Product>, FetchError> {
        let payload = self.source.get_json(url).await?;
        parse_catalog(&payload)
    }
}

#[async_trait]
impl<S: JsonSource + 'static> Loader for CatalogClient<S> {
    type Output = Vec<Product>;

    async fn load(&self, key: &str) -> Result<Vec<Product>, FetchError> {
        self.fetch_products(key).await
    }
}
