//! Validated line item quantities.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A positive line item quantity, at most [`MAX_QUANTITY_PER_ITEM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// One unit, the quantity of a freshly added line.
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> Result<Self, CommerceError> {
        if value == 0 {
            return Err(CommerceError::InvalidQuantity(value.to_string()));
        }
        if value > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit {
                requested: u64::from(value),
                max: MAX_QUANTITY_PER_ITEM,
            });
        }
        Ok(Self(value))
    }

    /// Parse a quantity typed or selected by the user.
    ///
    /// Anything that is not a finite number of at least 1 is rejected.
    /// Fractional values are truncated (`"2.7"` → 2).
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| CommerceError::InvalidQuantity(input.to_string()))?;

        if !value.is_finite() || value < 1.0 {
            return Err(CommerceError::InvalidQuantity(input.to_string()));
        }

        let whole = value.trunc();
        if whole > f64::from(MAX_QUANTITY_PER_ITEM) {
            return Err(CommerceError::QuantityExceedsLimit {
                requested: whole as u64,
                max: MAX_QUANTITY_PER_ITEM,
            });
        }

        Ok(Self(whole as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CommerceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> u32 {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_numbers() {
        assert_eq!(Quantity::parse("3").unwrap().get(), 3);
        assert_eq!(Quantity::parse(" 10 ").unwrap().get(), 10);
        assert_eq!(Quantity::parse("2.7").unwrap().get(), 2);
    }

    #[test]
    fn test_parse_rejects_non_positive_and_garbage() {
        for input in ["0", "-1", "abc", "NaN", "inf", "", "0.5", "3abc"] {
            let err = Quantity::parse(input).unwrap_err();
            assert!(
                matches!(err, CommerceError::InvalidQuantity(_)),
                "input {input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_over_limit() {
        let err = Quantity::parse("10000").unwrap_err();
        assert!(matches!(
            err,
            CommerceError::QuantityExceedsLimit { requested: 10000, max: MAX_QUANTITY_PER_ITEM }
        ));
        assert!(Quantity::parse("1e30").is_err());
    }

    #[test]
    fn test_new_and_default() {
        assert!(Quantity::new(0).is_err());
        assert_eq!(Quantity::default(), Quantity::ONE);
        assert_eq!(Quantity::new(MAX_QUANTITY_PER_ITEM).unwrap().get(), 9999);
    }

    #[test]
    fn test_serde_validates() {
        let q: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(q.get(), 4);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
