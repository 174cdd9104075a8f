//! Cart state and its transitions.
//!
//! The cart is pure bookkeeping: every transition is a synchronous method
//! with no I/O, so the whole state machine is testable without a session
//! store. The storefront layers persistence on top, re-serializing the cart
//! wholesale after each mutation; to that end the cart serializes as a bare
//! array of items.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A product snapshot plus quantity.
///
/// `title`, `price`, and `image` are copied from the product when the item
/// is first added and are never re-synced from the catalog afterwards.
/// Totals are computed from these snapshots, not from live catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The source product's id. A reference, not an owning relationship.
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

/// An ordered collection of [`CartItem`]s, at most one per product id.
///
/// Quantities are ≥ 1 whenever a mutating method has returned: an update
/// that would drive a quantity to zero or below removes the item instead of
/// leaving a zero or negative entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The item for `id`, if the product is in the cart.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging with any existing entry for the same product.
    ///
    /// A merge adds the incoming quantity to the existing one and keeps the
    /// existing snapshot fields, even if the incoming item was built from
    /// fresher catalog data. The cart takes quantities as given; clamping to
    /// a sane range is the calling surface's concern.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|existing| existing.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the item for `id`. No-op if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Set the quantity for `id` to an absolute value.
    ///
    /// Zero and negative values behave exactly like [`Cart::remove`]. No-op
    /// if the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
        } else if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove every item unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities. Zero for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of snapshot price × quantity across all items.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items
            .iter()
            .map(|item| item.price.times(item.quantity))
            .sum()
    }
}
