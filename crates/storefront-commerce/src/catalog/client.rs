//! Catalog access.

use async_trait::async_trait;
use storefront_data::{FetchClient, Response};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Base URL of the public catalog API.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// A source of catalog products.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products, in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError>;

    /// A single product by id.
    async fn product(&self, id: &ProductId) -> Result<Product, CommerceError>;
}

/// Catalog backed by the remote HTTP API.
///
/// `GET /products` for the listing and `GET /products/{id}` for a single
/// record. No pagination, no authentication.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Catalog at the given base URL with default client settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(
            FetchClient::new()
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
        )
    }

    /// Catalog using a preconfigured client. The client must carry a base URL.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.client.base_url()
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        let products: Vec<Product> = self
            .client
            .get("/products")
            .send()
            .await?
            .error_for_status()?
            .json()?;

        tracing::info!(count = products.len(), "loaded catalog");
        Ok(products)
    }

    async fn product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        let response = self
            .client
            .get(format!("/products/{}", id))
            .send()
            .await?;
        let product = product_from_response(id, response)?;

        tracing::debug!(product_id = %product.id, title = %product.title, "loaded product");
        Ok(product)
    }
}

/// Decode a `GET /products/{id}` response.
///
/// Unknown ids come back as 200 with an empty (or `null`) body; those and a
/// 404 are `ProductNotFound`. Any other failure status is a catalog error.
fn product_from_response(id: &ProductId, response: Response) -> Result<Product, CommerceError> {
    let not_found = || CommerceError::ProductNotFound(id.to_string());

    let response = response.error_for_status().map_err(|e| {
        if e.is_not_found() {
            not_found()
        } else {
            CommerceError::from(e)
        }
    })?;

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Err(not_found());
    }

    let product: Option<Product> = response.json()?;
    product.ok_or_else(not_found)
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.products.clone())
    }

    async fn product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::collections::HashMap;

    const URL: &str = "https://fakestoreapi.com/products/1";

    fn response(status: u16, body: &str) -> Response {
        Response::new(URL, status, HashMap::new(), body.as_bytes().to_vec())
    }

    fn decode(status: u16, body: &str) -> Result<Product, CommerceError> {
        product_from_response(&ProductId::new("1"), response(status, body))
    }

    #[test]
    fn test_product_response_decodes() {
        let product = decode(
            200,
            r#"{"id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing",
                "rating": {"rate": 3.9, "count": 120}}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new("1"));
        assert_eq!(product.price, Money::from_paise(10995));
    }

    #[test]
    fn test_missing_product_responses() {
        for (status, body) in [(404, "Not Found"), (200, ""), (200, "  \n"), (200, "null")] {
            let result = decode(status, body);
            assert!(
                matches!(result, Err(CommerceError::ProductNotFound(ref id)) if id == "1"),
                "status {status} body {body:?}: {result:?}"
            );
        }
    }

    #[test]
    fn test_other_failures_are_catalog_errors() {
        assert!(matches!(decode(500, "oops"), Err(CommerceError::Catalog(_))));
        assert!(matches!(decode(503, ""), Err(CommerceError::Catalog(_))));
        assert!(matches!(decode(200, "<html>"), Err(CommerceError::Catalog(_))));
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            Product::new("1", "Backpack", Money::from_rupees(109.95)),
            Product::new("2", "T-Shirt", Money::from_rupees(22.3)),
        ])
    }

    #[tokio::test]
    async fn test_in_memory_listing() {
        let products = catalog().list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Backpack");
    }

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let catalog = catalog();
        let product = catalog.product(&ProductId::new("2")).await.unwrap();
        assert_eq!(product.price, Money::from_paise(2230));

        let missing = catalog.product(&ProductId::new("42")).await;
        assert!(matches!(missing, Err(CommerceError::ProductNotFound(id)) if id == "42"));
    }

    #[test]
    fn test_http_catalog_default_base_url() {
        let catalog = HttpCatalog::default();
        assert_eq!(catalog.base_url(), Some(DEFAULT_CATALOG_URL));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_reported() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let catalog = HttpCatalog::new("http://127.0.0.1:9");
        let err = catalog.list_products().await.unwrap_err();
        assert!(matches!(err, CommerceError::Catalog(_)));
    }
}
