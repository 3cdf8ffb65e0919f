//! Order summary calculations.

use crate::cart::{AppliedDiscount, CartLineItem, Discount, Quantity};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat shipping and tax estimates added to every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat shipping estimate.
    pub shipping_estimate: Money,
    /// Flat tax estimate.
    pub tax_estimate: Money,
}

impl PricingConfig {
    /// Default flat shipping estimate, ₹5.00.
    pub const DEFAULT_SHIPPING: Money = Money::from_paise(500);
    /// Default flat tax estimate, ₹8.32.
    pub const DEFAULT_TAX: Money = Money::from_paise(832);

    pub fn new(shipping_estimate: Money, tax_estimate: Money) -> Self {
        Self {
            shipping_estimate,
            tax_estimate,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SHIPPING, Self::DEFAULT_TAX)
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Parsed discount.
    pub discount: Discount,
    /// Amount taken off by the discount.
    pub discount_total: Money,
    /// Validation message for the discount input, if it was rejected.
    pub discount_error: Option<String>,
    /// Shipping estimate.
    pub shipping_total: Money,
    /// Tax estimate.
    pub tax_total: Money,
    /// subtotal - discount + shipping + tax. May be negative.
    pub order_total: Money,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl OrderSummary {
    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        !self.discount_total.is_zero()
    }

    /// Subtotal after the discount, before shipping and tax.
    pub fn total_after_discount(&self) -> Money {
        self.subtotal - self.discount_total
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_id: LineItemId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: Quantity,
    /// unit_price * quantity.
    pub total: Money,
}

/// Derives order summaries from cart lines and the discount input.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Sum of `unit_price × quantity` over `items`.
    pub fn subtotal(&self, items: &[CartLineItem]) -> Result<Money, CommerceError> {
        let totals = items
            .iter()
            .map(|item| item.line_total().ok_or(CommerceError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals).ok_or(CommerceError::Overflow)
    }

    /// Compute the order summary.
    ///
    /// An invalid discount input is not an error here: it contributes zero
    /// and its message is carried in [`OrderSummary::discount_error`].
    /// Only arithmetic overflow fails.
    pub fn quote(
        &self,
        items: &[CartLineItem],
        discount_input: &str,
    ) -> Result<OrderSummary, CommerceError> {
        let line_items = items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    line_id: item.line_id.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total: item.line_total().ok_or(CommerceError::Overflow)?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal =
            Money::try_sum(line_items.iter().map(|l| l.total)).ok_or(CommerceError::Overflow)?;

        let applied = AppliedDiscount::evaluate(discount_input, subtotal);

        let order_total = subtotal
            .checked_sub(applied.amount)
            .and_then(|m| m.checked_add(self.config.shipping_estimate))
            .and_then(|m| m.checked_add(self.config.tax_estimate))
            .ok_or(CommerceError::Overflow)?;

        Ok(OrderSummary {
            subtotal,
            discount: applied.discount,
            discount_total: applied.amount,
            discount_error: applied.error,
            shipping_total: self.config.shipping_estimate,
            tax_total: self.config.tax_estimate,
            order_total,
            line_items,
        })
    }
}
