//! The order record and its lifecycle transitions.
//!
//! An order moves through exactly one path: `Created -> Paid -> Delivered`.
//! Transitions are one-way; re-entering the current status or moving
//! backwards fails with `InvalidTransition` and leaves the record untouched.
//! The timestamp invariants (`paid_at` set iff paid or delivered,
//! `delivered_at` set iff delivered) hold because the transition methods are
//! the only code that sets them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::errors::{OrderError, OrderResult};
use crate::pricing::{LineItem, PriceBreakdown};
use crate::types::{OrderId, OrderVersion, PaymentReference, Timestamp};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order has been created and awaits payment.
    Created,
    /// Payment has been captured for the order.
    Paid,
    /// The order has been delivered to the customer.
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Paid => write!(f, "paid"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

/// An order: a non-empty set of line items, the price breakdown computed at
/// creation time, and the lifecycle bookkeeping around it.
///
/// Orders are created once and then mutated only through [`Order::mark_paid`]
/// and [`Order::mark_delivered`]. The `version` field supports optimistic
/// concurrency control in the repository; callers never set it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// The items being ordered. Never empty.
    pub line_items: Vec<LineItem>,
    /// Price breakdown frozen at creation time.
    pub breakdown: PriceBreakdown,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order record was created.
    pub created_at: Timestamp,
    /// When payment was captured. Set iff status is `Paid` or `Delivered`.
    pub paid_at: Option<Timestamp>,
    /// When the order was delivered. Set iff status is `Delivered`.
    pub delivered_at: Option<Timestamp>,
    /// Processor reference confirming capture. Set together with `paid_at`.
    pub payment_reference: Option<PaymentReference>,
    /// Record version for optimistic concurrency control.
    pub version: OrderVersion,
}

impl Order {
    /// Create a new order in status `Created` with an initial version.
    ///
    /// The breakdown is expected to come from
    /// [`compute_breakdown`](crate::pricing::compute_breakdown) over the same
    /// items; [`OrderService`](crate::service::OrderService) guarantees that
    /// pairing.
    pub fn create(
        id: OrderId,
        line_items: Vec<LineItem>,
        breakdown: PriceBreakdown,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            line_items,
            breakdown,
            status: OrderStatus::Created,
            created_at,
            paid_at: None,
            delivered_at: None,
            payment_reference: None,
            version: OrderVersion::initial(),
        }
    }

    /// Record payment capture. Legal only from `Created`.
    ///
    /// A second `mark_paid` on an already-paid order is rejected rather than
    /// treated as an idempotent no-op; callers needing idempotent retries
    /// must de-duplicate by payment reference before calling.
    pub fn mark_paid(&mut self, reference: PaymentReference, now: Timestamp) -> OrderResult<()> {
        if self.status != OrderStatus::Created {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Paid,
            });
        }
        self.status = OrderStatus::Paid;
        self.paid_at = Some(now);
        self.payment_reference = Some(reference);
        Ok(())
    }

    /// Record delivery. Legal only from `Paid`.
    pub fn mark_delivered(&mut self, now: Timestamp) -> OrderResult<()> {
        if self.status != OrderStatus::Paid {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Delivered,
            });
        }
        self.status = OrderStatus::Delivered;
        self.delivered_at = Some(now);
        Ok(())
    }

    /// Whether the order is still awaiting payment.
    pub fn is_payable(&self) -> bool {
        self.status == OrderStatus::Created
    }
}
