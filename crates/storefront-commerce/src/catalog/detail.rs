//! Product detail view state.
//!
//! Each load is tagged with a [`LoadTicket`]. Only the result for the most
//! recent ticket is applied, so a slow response for a product the user has
//! already navigated away from cannot overwrite the newer view.

use crate::catalog::{CatalogSource, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Handle for one in-flight product load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    product_id: ProductId,
}

impl LoadTicket {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

/// What the detail view currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the catalog.
    Loading(ProductId),
    /// The product arrived.
    Loaded(Product),
    /// The fetch failed; the view shows no data.
    Failed(ProductId),
}

/// Single-product view state.
#[derive(Debug, Default)]
pub struct ProductDetail {
    generation: u64,
    state: DetailState,
}

impl ProductDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `id`, superseding any load in flight.
    pub fn begin(&mut self, id: ProductId) -> LoadTicket {
        self.generation += 1;
        self.state = DetailState::Loading(id.clone());
        LoadTicket {
            generation: self.generation,
            product_id: id,
        }
    }

    /// Apply the result of a load. Returns `false` if the ticket was stale
    /// and the result was dropped.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Product, CommerceError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                product_id = %ticket.product_id,
                "discarding superseded product load"
            );
            return false;
        }

        self.state = match result {
            Ok(product) => DetailState::Loaded(product),
            Err(e) => {
                tracing::warn!(product_id = %ticket.product_id, error = %e, "product load failed");
                DetailState::Failed(ticket.product_id)
            }
        };
        true
    }

    /// Begin and finish a load against `source`.
    pub async fn load(&mut self, source: &dyn CatalogSource, id: ProductId) -> Option<&Product> {
        let ticket = self.begin(id);
        let result = source.product(ticket.product_id()).await;
        self.finish(ticket, result);
        self.product()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded product, if any.
    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Loaded(product) => Some(product),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::money::Money;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_rupees(10.0))
    }

    #[test]
    fn test_load_applies_latest_result() {
        let mut detail = ProductDetail::new();
        let ticket = detail.begin(ProductId::new("1"));
        assert!(detail.is_loading());

        assert!(detail.finish(ticket, Ok(product("1"))));
        assert_eq!(detail.product().map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let mut detail = ProductDetail::new();
        let first = detail.begin(ProductId::new("1"));
        let second = detail.begin(ProductId::new("2"));

        assert!(detail.finish(second, Ok(product("2"))));
        assert!(!detail.finish(first, Ok(product("1"))));
        assert_eq!(detail.product().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_failure_leaves_view_empty() {
        let mut detail = ProductDetail::new();
        let ticket = detail.begin(ProductId::new("5"));
        detail.finish(ticket, Err(CommerceError::Catalog("connection refused".into())));

        assert!(detail.product().is_none());
        assert_eq!(detail.state(), &DetailState::Failed(ProductId::new("5")));
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let catalog = InMemoryCatalog::new(vec![product("3")]);
        let mut detail = ProductDetail::new();

        let loaded = detail.load(&catalog, ProductId::new("3")).await;
        assert_eq!(loaded.map(|p| p.title.as_str()), Some("Product 3"));

        assert!(detail.load(&catalog, ProductId::new("4")).await.is_none());
        assert!(matches!(detail.state(), DetailState::Failed(_)));
    }
}
