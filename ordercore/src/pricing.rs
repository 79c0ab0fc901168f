//! The pricing calculator: line items in, price breakdown out.
//!
//! `compute_breakdown` is a pure function with no shared state; it is safe
//! to call from any number of tasks concurrently. Rounding is applied per
//! component: subtotal first, then tax on the *rounded* subtotal. The
//! grand total is the plain sum of already-rounded addends. That ordering
//! is load-bearing for reproducibility: rounding only the final sum would
//! produce cent-level differences on some carts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{OrderError, OrderResult};
use crate::money::Money;
use crate::types::{ProductId, ProductName, Quantity};

/// Orders strictly above this subtotal ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = dec!(100.00);

/// Flat shipping rate applied below the free-shipping threshold.
pub const FLAT_SHIPPING_RATE: Decimal = dec!(10.00);

/// Sales tax rate applied to the rounded items subtotal.
pub const TAX_RATE: Decimal = dec!(0.15);

/// A single product/quantity/price entry within an order.
///
/// Immutable once part of an order; the unit price is the price at the time
/// the item was added, not a reference into a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Product name as shown to the customer.
    pub name: ProductName,
    /// Unit price at the time the item was added.
    pub unit_price: Money,
    /// Number of units.
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a new line item.
    pub const fn new(
        product_id: ProductId,
        name: ProductName,
        unit_price: Money,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id,
            name,
            unit_price,
            quantity,
        }
    }

    /// Total price for this line (unit price times quantity).
    pub fn line_total(&self) -> OrderResult<Money> {
        self.unit_price.multiply_by_quantity(self.quantity)
    }
}

/// The itemized components of an order's price.
///
/// Invariant: `grand_total == items_total + shipping_cost + tax_amount`
/// exactly, since every addend is already rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of all line totals, rounded half-up to the cent.
    pub items_total: Money,
    /// Flat shipping, or zero above the free-shipping threshold.
    pub shipping_cost: Money,
    /// Tax on the rounded items subtotal.
    pub tax_amount: Money,
    /// Sum of the three components above.
    pub grand_total: Money,
}

/// Compute the price breakdown for a non-empty sequence of line items.
///
/// Fails with [`OrderError::InvalidLineItem`] on an empty sequence. Item
/// prices and quantities are valid by construction, so no per-item checks
/// are repeated here.
pub fn compute_breakdown(line_items: &[LineItem]) -> OrderResult<PriceBreakdown> {
    if line_items.is_empty() {
        return Err(OrderError::InvalidLineItem(
            "order must contain at least one line item".to_string(),
        ));
    }

    let mut raw_subtotal = Decimal::ZERO;
    for item in line_items {
        raw_subtotal += item.unit_price.amount() * Decimal::from(item.quantity.value());
    }
    let items_total = Money::from_decimal_rounded(raw_subtotal)?;

    // Free shipping is decided on the rounded subtotal, strict `>` at the
    // threshold: a cart of exactly $100.00 still pays shipping.
    let shipping_cost = if items_total.amount() > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        Money::new(FLAT_SHIPPING_RATE)?
    };

    let tax_amount = Money::from_decimal_rounded(items_total.amount() * TAX_RATE)?;

    let grand_total = items_total
        .checked_add(shipping_cost)?
        .checked_add(tax_amount)?;

    Ok(PriceBreakdown {
        items_total,
        shipping_cost,
        tax_amount,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(cents: u64, quantity: u32) -> LineItem {
        LineItem::new(
            ProductId::generate(),
            ProductName::try_new("Test Product".to_string()).unwrap(),
            Money::from_cents(cents).unwrap(),
            Quantity::new(quantity).unwrap(),
        )
    }

    #[test]
    fn empty_order_is_rejected() {
        assert!(matches!(
            compute_breakdown(&[]),
            Err(OrderError::InvalidLineItem(_))
        ));
    }

    #[test]
    fn sample_cart_below_free_shipping() {
        // 2 x $25.00 + 1 x $10.00
        let breakdown = compute_breakdown(&[item(2500, 2), item(1000, 1)]).unwrap();
        assert_eq!(breakdown.items_total.to_cents(), 6000);
        assert_eq!(breakdown.shipping_cost.to_cents(), 1000);
        assert_eq!(breakdown.tax_amount.to_cents(), 900);
        assert_eq!(breakdown.grand_total.to_cents(), 7900);
    }

    #[test]
    fn sample_cart_above_free_shipping() {
        // 2 x $60.00
        let breakdown = compute_breakdown(&[item(6000, 2)]).unwrap();
        assert_eq!(breakdown.items_total.to_cents(), 12000);
        assert_eq!(breakdown.shipping_cost.to_cents(), 0);
        assert_eq!(breakdown.tax_amount.to_cents(), 1800);
        assert_eq!(breakdown.grand_total.to_cents(), 13800);
    }

    #[test]
    fn shipping_threshold_is_strictly_greater_than() {
        // Exactly $100.00 still pays the flat rate
        let at_threshold = compute_breakdown(&[item(10000, 1)]).unwrap();
        assert_eq!(at_threshold.shipping_cost.to_cents(), 1000);

        // One cent over ships free
        let over_threshold = compute_breakdown(&[item(10001, 1)]).unwrap();
        assert_eq!(over_threshold.shipping_cost.to_cents(), 0);
    }

    #[test]
    fn tax_is_computed_on_the_rounded_subtotal() {
        // $0.03 subtotal -> raw tax 0.0045, below half a cent, rounds to $0.00
        let breakdown = compute_breakdown(&[item(3, 1)]).unwrap();
        assert_eq!(breakdown.tax_amount.to_cents(), 0);

        // $0.04 subtotal -> raw tax 0.006, rounds up to a cent
        let breakdown = compute_breakdown(&[item(4, 1)]).unwrap();
        assert_eq!(breakdown.tax_amount.to_cents(), 1);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(item(2500, 3).line_total().unwrap().to_cents(), 7500);
    }

    proptest! {
        #[test]
        fn prop_grand_total_is_exact_sum_of_components(
            items in prop::collection::vec((1u64..100_000, 1u32..=50), 1..10)
        ) {
            let line_items: Vec<LineItem> =
                items.into_iter().map(|(cents, qty)| item(cents, qty)).collect();
            let breakdown = compute_breakdown(&line_items).unwrap();
            prop_assert_eq!(
                breakdown.grand_total.amount(),
                breakdown.items_total.amount()
                    + breakdown.shipping_cost.amount()
                    + breakdown.tax_amount.amount()
            );
        }

        #[test]
        fn prop_shipping_is_free_iff_subtotal_over_threshold(
            items in prop::collection::vec((1u64..50_000, 1u32..=10), 1..8)
        ) {
            let line_items: Vec<LineItem> =
                items.into_iter().map(|(cents, qty)| item(cents, qty)).collect();
            let breakdown = compute_breakdown(&line_items).unwrap();
            if breakdown.items_total.amount() > FREE_SHIPPING_THRESHOLD {
                prop_assert!(breakdown.shipping_cost.is_zero());
            } else {
                prop_assert_eq!(breakdown.shipping_cost.to_cents(), 1000);
            }
        }

        #[test]
        fn prop_breakdown_is_deterministic(
            items in prop::collection::vec((1u64..100_000, 1u32..=50), 1..10)
        ) {
            let line_items: Vec<LineItem> =
                items.into_iter().map(|(cents, qty)| item(cents, qty)).collect();
            let first = compute_breakdown(&line_items).unwrap();
            let second = compute_breakdown(&line_items).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
