//! Shopping cart module.
//!
//! Contains the cart store, quantity validation, discount parsing, pricing
//! and the session that ties them together for a cart view.

mod discount;
mod events;
mod pricing;
mod quantity;
mod session;
mod store;

pub use discount::{AppliedDiscount, Discount, PERCENTAGE_CEILING};
pub use events::{CartEvent, SubscriptionId};
pub use pricing::{LineItemPricing, OrderSummary, PricingConfig, PricingEngine};
pub use quantity::{Quantity, MAX_QUANTITY_PER_ITEM};
pub use session::CartSession;
pub use store::{CartLineItem, CartStore};
