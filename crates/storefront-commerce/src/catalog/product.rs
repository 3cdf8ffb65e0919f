//! Catalog product records.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating, 0.0 - 5.0.
    #[serde(default)]
    pub rate: f64,
    /// Number of ratings.
    #[serde(default)]
    pub count: u64,
}

impl Rating {
    pub fn new(rate: f64, count: u64) -> Self {
        Self { rate, count }
    }

    /// Whole-star rating for compact display (rounds up, like the cart view).
    pub fn stars(&self) -> u8 {
        self.rate.ceil().clamp(0.0, 5.0) as u8
    }
}

/// A product in the catalog.
///
/// Decoded from the catalog API's JSON shape, where `price` is a decimal
/// rupee amount and `id` is numeric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Long description, when the API provides one.
    pub description: Option<String>,
    /// Category name, e.g. "electronics".
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Rating summary.
    pub rating: Rating,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: None,
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wire representation of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductRecord {
    id: ProductId,
    title: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    rating: Rating,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CommerceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = Money::try_from_rupees(record.price)
            .filter(|price| !price.is_negative())
            .ok_or_else(|| {
                CommerceError::InvalidProduct(format!(
                    "product {} has price {}",
                    record.id, record.price
                ))
            })?;

        Ok(Self {
            id: record.id,
            title: record.title,
            price,
            description: record.description,
            category: record.category,
            image: record.image,
            rating: record.rating,
        })
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price.to_rupees(),
            description: product.description,
            category: product.category,
            image: product.image,
            rating: product.rating,
        }
    }
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        let category = product.category.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Products in the given category (case-insensitive).
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_decode_catalog_record() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();
        assert_eq!(product.id, ProductId::new("1"));
        assert_eq!(product.price, Money::from_paise(10995));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating, Rating::new(3.9, 120));
        assert_eq!(product.rating.stars(), 4);
        assert!(product.description.is_some());
    }

    #[test]
    fn test_decode_without_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": "x-1", "title": "Mug", "price": 5}"#).unwrap();
        assert_eq!(product.price, Money::from_rupees(5.0));
        assert_eq!(product.rating, Rating::default());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result: Result<Product, _> =
            serde_json::from_str(r#"{"id": 2, "title": "Broken", "price": -1.5}"#);
        assert!(result.is_err());

        let result: Result<Product, _> =
            serde_json::from_str(r#"{"id": 3, "title": "Priceless", "price": 1e300}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_uses_wire_shape() {
        let product = Product::new("9", "Hard Drive", Money::from_rupees(64.0))
            .with_category("electronics");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(64.0));
        assert_eq!(json["id"], serde_json::json!("9"));
    }

    #[test]
    fn test_category_helpers() {
        let products = vec![
            Product::new("1", "Ring", Money::from_rupees(10.0)).with_category("jewelery"),
            Product::new("2", "SSD", Money::from_rupees(109.0)).with_category("electronics"),
            Product::new("3", "Bracelet", Money::from_rupees(9.99)).with_category("jewelery"),
        ];

        assert_eq!(categories(&products), vec!["jewelery", "electronics"]);

        let jewelry = filter_by_category(&products, "Jewelery");
        assert_eq!(jewelry.len(), 2);
        assert!(filter_by_category(&products, "toys").is_empty());
    }
}
