//! The order lifecycle service.
//!
//! [`OrderService`] ties the pricing calculator, the repository, and the
//! clock together behind the four operations an HTTP adapter would expose:
//! create, mark paid, mark delivered, and fetch. The service itself holds no
//! mutable state; all state lives in the repository, and conflicting writes
//! on the same order are rejected by the repository's version check and
//! surfaced as `ConcurrentModification`.
//!
//! Authorization (owner-or-admin on fetch, admin on delivery) is the
//! caller's responsibility; identity never reaches this layer.

use tracing::{info, instrument};

use crate::clock::Clock;
use crate::errors::{OrderError, OrderResult};
use crate::order::Order;
use crate::pricing::{compute_breakdown, LineItem};
use crate::repository::OrderRepository;
use crate::types::{OrderId, PaymentReference};

/// Order lifecycle tracker over a repository and a clock.
#[derive(Debug, Clone)]
pub struct OrderService<R, C> {
    repository: R,
    clock: C,
}

impl<R, C> OrderService<R, C>
where
    R: OrderRepository,
    C: Clock,
{
    /// Create a service over the given repository and clock.
    pub const fn new(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }

    /// Create and persist a new order in status `Created`.
    ///
    /// Computes the price breakdown for `line_items` (failing with
    /// `InvalidLineItem` on an empty sequence) and assigns a fresh id.
    #[instrument(skip(self, line_items), fields(item_count = line_items.len()))]
    pub async fn create_order(&self, line_items: Vec<LineItem>) -> OrderResult<Order> {
        let breakdown = compute_breakdown(&line_items)?;
        let mut order = Order::create(
            OrderId::generate(),
            line_items,
            breakdown,
            self.clock.now(),
        );
        order.version = self.repository.save(&order).await?;
        info!(
            order_id = %order.id,
            grand_total = %order.breakdown.grand_total,
            "order created"
        );
        Ok(order)
    }

    /// Transition an order from `Created` to `Paid`, recording the payment
    /// reference and capture time.
    ///
    /// An empty (or all-whitespace) reference fails with
    /// `MissingPaymentReference` before the order is even loaded, so the
    /// stored record is guaranteed untouched. A writer racing another
    /// transition on the same order loses with `ConcurrentModification`.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: &OrderId, payment_reference: &str) -> OrderResult<Order> {
        let reference = PaymentReference::try_new(payment_reference)
            .map_err(|_| OrderError::MissingPaymentReference)?;

        let mut order = self.repository.load(id).await?;
        order.mark_paid(reference, self.clock.now())?;
        order.version = self.repository.save(&order).await?;
        info!(order_id = %order.id, "order marked paid");
        Ok(order)
    }

    /// Transition an order from `Paid` to `Delivered`, recording the
    /// delivery time.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: &OrderId) -> OrderResult<Order> {
        let mut order = self.repository.load(id).await?;
        order.mark_delivered(self.clock.now())?;
        order.version = self.repository.save(&order).await?;
        info!(order_id = %order.id, "order marked delivered");
        Ok(order)
    }

    /// Fetch an order by id. Fails with `NotFound` if absent.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> OrderResult<Order> {
        Ok(self.repository.load(id).await?)
    }
}
