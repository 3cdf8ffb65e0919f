//! Discount input parsing.
//!
//! The cart has a single free-text discount field. Its leading number is
//! what counts: up to 100 it is a percentage, above 100 a fixed rupee amount.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Values up to and including this are percentages; above it, rupees.
pub const PERCENTAGE_CEILING: f64 = 100.0;

/// A parsed discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// No discount entered.
    #[default]
    None,
    /// Percentage off the subtotal, in `(0, 100]`.
    Percentage(f64),
    /// Fixed amount off the order.
    Fixed(Money),
}

impl Discount {
    /// Parse the raw discount field.
    ///
    /// An empty field means no discount. Otherwise the field is read for its
    /// leading number, so `"10%"` is ten percent. The number must be finite,
    /// greater than zero and, as a fixed amount, representable in paise.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        if input.is_empty() {
            return Ok(Discount::None);
        }

        let invalid = || CommerceError::InvalidDiscount(input.to_string());
        let value = leading_number(input).ok_or_else(invalid)?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid());
        }

        if value <= PERCENTAGE_CEILING {
            Ok(Discount::Percentage(value))
        } else {
            Money::try_from_rupees(value)
                .map(Discount::Fixed)
                .ok_or_else(invalid)
        }
    }

    /// The amount this discount takes off `subtotal`.
    pub fn amount(&self, subtotal: Money) -> Money {
        match self {
            Discount::None => Money::zero(),
            Discount::Percentage(percent) => subtotal.percentage(*percent),
            // Not clamped to the subtotal: the order total can go negative.
            Discount::Fixed(amount) => *amount,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Discount::None)
    }
}

/// The longest decimal number at the start of `text`, after leading
/// whitespace: an optional sign, digits with an optional fraction, and an
/// optional exponent. Anything after it is ignored.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if let Some(b'e' | b'E') = bytes.get(end) {
        let mut exp_start = end + 1;
        if let Some(b'+' | b'-') = bytes.get(exp_start) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// The outcome of evaluating the discount field against a subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// The parsed discount; `None` when the input was empty or invalid.
    pub discount: Discount,
    /// Amount taken off.
    pub amount: Money,
    /// Validation message when the input was rejected.
    pub error: Option<String>,
}

impl AppliedDiscount {
    /// Evaluate `input` against `subtotal`. Invalid input yields a zero
    /// amount and a validation message instead of an error.
    pub fn evaluate(input: &str, subtotal: Money) -> Self {
        match Discount::parse(input) {
            Ok(discount) => Self {
                discount,
                amount: discount.amount(subtotal),
                error: None,
            },
            Err(e) => Self {
                discount: Discount::None,
                amount: Money::zero(),
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}
