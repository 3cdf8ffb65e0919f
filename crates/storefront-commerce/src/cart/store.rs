//! Cart store and line item types.

use crate::cart::events::Listeners;
use crate::cart::{CartEvent, Quantity, SubscriptionId};
use crate::catalog::{Product, Rating};
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One entry in the cart.
///
/// Display fields are copied from the product when the line is created and
/// are not refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Unique within the cart.
    pub line_id: LineItemId,
    /// Catalog product this line was created from.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: Quantity,
    /// Product category.
    pub category: String,
    /// Product image URL.
    pub image: String,
    /// Product rating.
    pub rating: Rating,
}

impl CartLineItem {
    /// A new line for `product` with a fresh line id and quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            line_id: LineItemId::generate(),
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            quantity: Quantity::ONE,
            category: product.category.clone(),
            image: product.image.clone(),
            rating: product.rating,
        }
    }

    /// `unit_price × quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(i64::from(self.quantity.get()))
    }

    pub(crate) fn matches(&self, product_id: &ProductId, line_id: &LineItemId) -> bool {
        &self.product_id == product_id && &self.line_id == line_id
    }
}

/// Ordered collection of cart lines with change notification.
///
/// Every add creates a new line, even for a product already in the cart.
/// Lines are addressed by the `(product_id, line_id)` pair.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    listeners: Listeners,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line for `product`. Returns the new line's id.
    pub fn add_item(&mut self, product: &Product) -> LineItemId {
        let item = self.new_line(product);
        self.push_line(item)
    }

    /// A line for `product` whose id is not yet used in this cart.
    pub(crate) fn new_line(&self, product: &Product) -> CartLineItem {
        let mut item = CartLineItem::from_product(product);
        while self.items.iter().any(|i| i.line_id == item.line_id) {
            item.line_id = LineItemId::generate();
        }
        item
    }

    /// Append a line built by [`new_line`](Self::new_line).
    pub(crate) fn push_line(&mut self, item: CartLineItem) -> LineItemId {
        let line_id = item.line_id.clone();
        let product_id = item.product_id.clone();
        tracing::debug!(product_id = %product_id, line_id = %line_id, "cart line added");
        self.items.push(item);

        self.listeners.notify(&CartEvent::ItemAdded {
            product_id,
            line_id: line_id.clone(),
        });
        line_id
    }

    /// Remove the line matching both ids. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, line_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, line_id));
        let removed = self.items.len() < len_before;

        if removed {
            tracing::debug!(product_id = %product_id, line_id = %line_id, "cart line removed");
            self.listeners.notify(&CartEvent::ItemRemoved {
                product_id: product_id.clone(),
                line_id: line_id.clone(),
            });
        }
        removed
    }

    /// Overwrite the quantity of the matching line. Returns whether it matched.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        line_id: &LineItemId,
        quantity: Quantity,
    ) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.matches(product_id, line_id)) else {
            return false;
        };

        item.quantity = quantity;
        tracing::debug!(
            product_id = %product_id,
            line_id = %line_id,
            quantity = quantity.get(),
            "cart quantity updated"
        );
        self.listeners.notify(&CartEvent::QuantityUpdated {
            product_id: product_id.clone(),
            line_id: line_id.clone(),
            quantity,
        });
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        tracing::debug!(removed, "cart cleared");
        self.listeners.notify(&CartEvent::Cleared { removed });
    }

    /// Register a listener called after every state transition.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by both ids.
    pub fn get(&self, product_id: &ProductId, line_id: &LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.matches(product_id, line_id))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn backpack() -> Product {
        Product::new("1", "Backpack", Money::from_rupees(109.95))
            .with_category("men's clothing")
            .with_rating(Rating::new(3.9, 120))
    }

    fn ring() -> Product {
        Product::new("5", "Dragon Ring", Money::from_rupees(695.0)).with_category("jewelery")
    }

    #[test]
    fn test_add_copies_product_fields() {
        let mut store = CartStore::new();
        let line_id = store.add_item(&backpack());

        let item = store.get(&ProductId::new("1"), &line_id).unwrap();
        assert_eq!(item.title, "Backpack");
        assert_eq!(item.unit_price, Money::from_paise(10995));
        assert_eq!(item.quantity, Quantity::ONE);
        assert_eq!(item.category, "men's clothing");
        assert_eq!(item.rating.count, 120);
    }

    #[test]
    fn test_same_product_twice_makes_two_lines() {
        let mut store = CartStore::new();
        let first = store.add_item(&backpack());
        let second = store.add_item(&backpack());

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_remove_requires_both_ids() {
        let mut store = CartStore::new();
        let first = store.add_item(&backpack());
        let second = store.add_item(&backpack());
        let ring_line = store.add_item(&ring());

        // Right line id, wrong product.
        assert!(!store.remove_item(&ProductId::new("5"), &first));
        assert_eq!(store.len(), 3);

        assert!(store.remove_item(&ProductId::new("1"), &first));
        assert!(store.get(&ProductId::new("1"), &first).is_none());
        assert!(store.get(&ProductId::new("1"), &second).is_some());
        assert!(store.get(&ProductId::new("5"), &ring_line).is_some());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = CartStore::new();
        store.add_item(&ring());
        assert!(!store.remove_item(&ProductId::new("5"), &LineItemId::new("_nope")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut store = CartStore::new();
        let line_id = store.add_item(&ring());
        let three = Quantity::new(3).unwrap();

        assert!(store.update_quantity(&ProductId::new("5"), &line_id, three));
        assert_eq!(store.items()[0].quantity, three);
        assert_eq!(store.items()[0].line_total(), Some(Money::from_rupees(2085.0)));

        assert!(!store.update_quantity(&ProductId::new("1"), &line_id, Quantity::ONE));
        assert_eq!(store.items()[0].quantity, three);
    }

    #[test]
    fn test_clear() {
        let mut store = CartStore::new();
        store.add_item(&ring());
        store.add_item(&backpack());
        store.clear();
        assert!(store.is_empty());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_listeners_see_transitions_in_order() {
        let seen: Rc<RefCell<Vec<CartEvent>>> = Rc::default();
        let mut store = CartStore::new();
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let line_id = store.add_item(&ring());
        store.update_quantity(&ProductId::new("5"), &line_id, Quantity::new(2).unwrap());
        store.remove_item(&ProductId::new("5"), &LineItemId::new("_missing"));
        store.remove_item(&ProductId::new("5"), &line_id);
        store.clear();

        let events = seen.borrow();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], CartEvent::ItemAdded { .. }));
        assert!(matches!(events[1], CartEvent::QuantityUpdated { .. }));
        assert!(matches!(events[2], CartEvent::ItemRemoved { .. }));
        assert_eq!(events[3], CartEvent::Cleared { removed: 0 });
        drop(events);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_item(&ring());
        assert_eq!(seen.borrow().len(), 4);
    }
}
