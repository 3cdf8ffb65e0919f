//! Product catalog module.
//!
//! Contains the product record, the catalog client and the product detail
//! view state.

mod client;
mod detail;
mod product;

pub use client::{CatalogSource, HttpCatalog, InMemoryCatalog, DEFAULT_CATALOG_URL};
pub use detail::{DetailState, LoadTicket, ProductDetail};
pub use product::{categories, filter_by_category, Product, Rating};
