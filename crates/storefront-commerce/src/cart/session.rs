//! Cart view state.
//!
//! `CartSession` is what a cart view holds: the store, the discount field,
//! per-line quantity messages and the order summary, which is recomputed
//! after every change to the lines or the discount input.

use std::collections::HashMap;

use crate::cart::{
    CartEvent, CartLineItem, CartStore, OrderSummary, PricingEngine, Quantity, SubscriptionId,
};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};

#[derive(Debug)]
pub struct CartSession {
    store: CartStore,
    engine: PricingEngine,
    discount_input: String,
    quantity_errors: HashMap<LineItemId, String>,
    summary: OrderSummary,
}

impl CartSession {
    /// An empty cart priced by `engine`.
    pub fn new(engine: PricingEngine) -> Result<Self, CommerceError> {
        let store = CartStore::new();
        let summary = engine.quote(store.items(), "")?;
        Ok(Self {
            store,
            engine,
            discount_input: String::new(),
            quantity_errors: HashMap::new(),
            summary,
        })
    }

    // Every change is priced before it is applied: when pricing fails, the
    // store, the discount text and the summary are left as they were.

    /// Add a product as a new line.
    pub fn add_product(&mut self, product: &Product) -> Result<LineItemId, CommerceError> {
        let item = self.store.new_line(product);
        let mut candidate = self.store.items().to_vec();
        candidate.push(item.clone());
        let summary = self.engine.quote(&candidate, &self.discount_input)?;

        let line_id = self.store.push_line(item);
        self.summary = summary;
        Ok(line_id)
    }

    /// Remove a line. Its pending quantity message goes with it.
    pub fn remove(
        &mut self,
        product_id: &ProductId,
        line_id: &LineItemId,
    ) -> Result<bool, CommerceError> {
        if self.store.get(product_id, line_id).is_none() {
            return Ok(false);
        }
        let candidate: Vec<CartLineItem> = self
            .store
            .items()
            .iter()
            .filter(|item| !item.matches(product_id, line_id))
            .cloned()
            .collect();
        let summary = self.engine.quote(&candidate, &self.discount_input)?;

        self.store.remove_item(product_id, line_id);
        self.quantity_errors.remove(line_id);
        self.summary = summary;
        Ok(true)
    }

    /// Apply a quantity typed or selected by the user.
    ///
    /// On a validation failure the message is recorded under `line_id`, the
    /// line keeps its quantity, and the validation error is returned. On
    /// success any previous message for the line is cleared.
    pub fn change_quantity(
        &mut self,
        product_id: &ProductId,
        line_id: &LineItemId,
        input: &str,
    ) -> Result<Quantity, CommerceError> {
        let quantity = match Quantity::parse(input) {
            Ok(quantity) => quantity,
            Err(e) => {
                tracing::debug!(line_id = %line_id, input, "rejected quantity");
                self.quantity_errors.insert(line_id.clone(), e.to_string());
                return Err(e);
            }
        };

        if self.store.get(product_id, line_id).is_some() {
            let mut candidate = self.store.items().to_vec();
            for item in candidate
                .iter_mut()
                .filter(|item| item.matches(product_id, line_id))
            {
                item.quantity = quantity;
            }
            let summary = self.engine.quote(&candidate, &self.discount_input)?;

            self.store.update_quantity(product_id, line_id, quantity);
            self.summary = summary;
        }
        self.quantity_errors.remove(line_id);
        Ok(quantity)
    }

    /// Replace the discount field text.
    pub fn set_discount_input(&mut self, input: impl Into<String>) -> Result<(), CommerceError> {
        let input = input.into();
        let summary = self.engine.quote(self.store.items(), &input)?;

        self.discount_input = input;
        self.summary = summary;
        Ok(())
    }

    /// Empty the cart and drop all quantity messages.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        let summary = self.engine.quote(&[], &self.discount_input)?;

        self.store.clear();
        self.quantity_errors.clear();
        self.summary = summary;
        Ok(())
    }

    /// The current order summary.
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    pub fn discount_input(&self) -> &str {
        &self.discount_input
    }

    /// Validation message for the discount field, if any.
    pub fn discount_error(&self) -> Option<&str> {
        self.summary.discount_error.as_deref()
    }

    /// Validation message for a line's quantity, if any.
    pub fn quantity_error(&self, line_id: &LineItemId) -> Option<&str> {
        self.quantity_errors.get(line_id).map(String::as_str)
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Register a listener on the underlying store. It is called after every
    /// committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }
}
