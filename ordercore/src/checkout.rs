//! Payment capture workflow.
//!
//! The storefront's pay button boils down to a sequential workflow:
//! check the order is still payable, ask the external processor to capture
//! the grand total, and only then record the payment on the order. Nothing
//! is committed before `mark_paid`, so a caller abandoning the workflow
//! mid-flight (or a gateway failure) leaves the order exactly as it was.

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::clock::Clock;
use crate::errors::{OrderError, OrderResult, PaymentError};
use crate::money::Money;
use crate::order::{Order, OrderStatus};
use crate::repository::OrderRepository;
use crate::service::OrderService;
use crate::types::{OrderId, PaymentReference};

/// External payment-capture collaborator.
///
/// Implementations wrap a real processor (or a test double); timeouts and
/// transport concerns live inside the implementation, not in this crate.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture `amount` for the given order, returning the processor's
    /// confirmation reference.
    async fn capture(
        &self,
        order_id: &OrderId,
        amount: Money,
    ) -> Result<PaymentReference, PaymentError>;
}

/// Run the capture-then-mark-paid workflow for an order.
///
/// Rejects orders that are already paid or delivered *before* contacting
/// the gateway, so a double click on the pay button cannot capture funds
/// twice. Gateway failures surface as [`OrderError::Payment`] with the
/// order untouched.
#[instrument(skip(service, gateway))]
pub async fn capture_and_mark_paid<R, C, G>(
    service: &OrderService<R, C>,
    gateway: &G,
    order_id: &OrderId,
) -> OrderResult<Order>
where
    R: OrderRepository,
    C: Clock,
    G: PaymentGateway,
{
    let order = service.get_order(order_id).await?;
    if !order.is_payable() {
        return Err(OrderError::InvalidTransition {
            from: order.status,
            to: OrderStatus::Paid,
        });
    }

    let amount = order.breakdown.grand_total;
    let reference = match gateway.capture(order_id, amount).await {
        Ok(reference) => reference,
        Err(err) => {
            warn!(order_id = %order_id, %err, "payment capture failed");
            return Err(err.into());
        }
    };
    info!(order_id = %order_id, %amount, "payment captured");

    service.mark_paid(order_id, &reference).await
}
