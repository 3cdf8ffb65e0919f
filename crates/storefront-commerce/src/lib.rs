//! Catalog, cart and pricing logic for the storefront.
//!
//! - **Catalog**: product records, the HTTP catalog client and the product
//!   detail view state
//! - **Cart**: the line item store, quantity validation, discount parsing,
//!   order pricing and the cart session a view holds
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let catalog = HttpCatalog::default();
//! let product = catalog.product(&ProductId::new("1")).await?;
//!
//! let mut session = CartSession::new(PricingEngine::default())?;
//! let line_id = session.add_product(&product)?;
//! session.change_quantity(&product.id, &line_id, "2")?;
//! session.set_discount_input("10")?;
//!
//! println!("Total: {}", session.summary().order_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        CatalogSource, DetailState, HttpCatalog, InMemoryCatalog, Product, ProductDetail, Rating,
    };

    // Cart
    pub use crate::cart::{
        AppliedDiscount, CartEvent, CartLineItem, CartSession, CartStore, Discount,
        LineItemPricing, OrderSummary, PricingConfig, PricingEngine, Quantity,
    };
}
