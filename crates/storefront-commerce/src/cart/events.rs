//! Cart change notification.

use crate::cart::Quantity;
use crate::ids::{LineItemId, ProductId};
use std::fmt;

/// A state transition of the cart store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded {
        product_id: ProductId,
        line_id: LineItemId,
    },
    ItemRemoved {
        product_id: ProductId,
        line_id: LineItemId,
    },
    QuantityUpdated {
        product_id: ProductId,
        line_id: LineItemId,
        quantity: Quantity,
    },
    /// Every line was removed; `removed` is how many there were.
    Cleared { removed: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent)>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < len_before
    }

    pub(crate) fn notify(&mut self, event: &CartEvent) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
