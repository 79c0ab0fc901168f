//! Shopping cart as an explicit value with pure reducers.
//!
//! The cart is passed around and returned, never held in an ambient
//! singleton. Every reducer recomputes the price breakdown so the cart's
//! totals can never drift out of sync with its items; an empty cart simply
//! has no breakdown.

use serde::{Deserialize, Serialize};

use crate::errors::OrderResult;
use crate::pricing::{compute_breakdown, LineItem, PriceBreakdown};
use crate::types::ProductId;

/// A customer's cart: the items selected so far plus the derived breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    breakdown: Option<PriceBreakdown>,
}

impl Cart {
    /// An empty cart with no breakdown.
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            breakdown: None,
        }
    }

    /// The items currently in the cart, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The current price breakdown, or `None` for an empty cart.
    pub const fn breakdown(&self) -> Option<&PriceBreakdown> {
        self.breakdown.as_ref()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item to the cart.
    ///
    /// If the product is already in the cart the new entry replaces the old
    /// one (quantity and captured price included), matching how a storefront
    /// updates the quantity selector on a product already in the cart.
    pub fn add_item(mut self, item: LineItem) -> OrderResult<Self> {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.reprice()
    }

    /// Remove a product from the cart. Removing an absent product is a no-op.
    pub fn remove_item(mut self, product_id: &ProductId) -> OrderResult<Self> {
        self.items.retain(|item| item.product_id != *product_id);
        self.reprice()
    }

    /// Drop all items, e.g. after a successful checkout.
    pub fn clear(self) -> Self {
        Self::empty()
    }

    /// Hand the cart's items over for order creation, consuming the cart.
    pub fn into_line_items(self) -> Vec<LineItem> {
        self.items
    }

    fn reprice(mut self) -> OrderResult<Self> {
        self.breakdown = if self.items.is_empty() {
            None
        } else {
            Some(compute_breakdown(&self.items)?)
        };
        Ok(self)
    }
}
