//! Commerce error types.

use storefront_data::FetchError;
use thiserror::Error;

/// Errors that can occur in catalog, cart and pricing operations.
///
/// The `Display` text of the validation variants is the message shown next
/// to the offending input.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog could not be reached or answered with an error.
    #[error("Catalog unavailable: {0}")]
    Catalog(String),

    /// A catalog record failed validation.
    #[error("Invalid product record: {0}")]
    InvalidProduct(String),

    /// Requested quantity is not a positive number.
    #[error("Quantity must be a positive number.")]
    InvalidQuantity(String),

    /// Requested quantity exceeds the per-line limit.
    #[error("Quantity must be at most {max}.")]
    QuantityExceedsLimit { requested: u64, max: u32 },

    /// Discount input is neither empty nor a positive number.
    #[error("Invalid discount value.")]
    InvalidDiscount(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Whether this error is a user-input validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::InvalidQuantity(_)
                | CommerceError::QuantityExceedsLimit { .. }
                | CommerceError::InvalidDiscount(_)
        )
    }
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        CommerceError::Catalog(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            CommerceError::InvalidQuantity("abc".into()).to_string(),
            "Quantity must be a positive number."
        );
        assert_eq!(
            CommerceError::InvalidDiscount("-5".into()).to_string(),
            "Invalid discount value."
        );
        assert!(CommerceError::InvalidDiscount(String::new()).is_validation());
        assert!(!CommerceError::Overflow.is_validation());
    }

    #[test]
    fn test_fetch_error_conversion() {
        let err: CommerceError = FetchError::Timeout("https://fakestoreapi.com/products".into()).into();
        assert!(matches!(err, CommerceError::Catalog(_)));
    }
}
