//! Error types for the order domain.
//!
//! Errors are split by subsystem: [`OrderError`] covers domain and lifecycle
//! failures surfaced to callers of the order service, [`RepositoryError`]
//! covers the persistence layer, and [`PaymentError`] covers the external
//! payment-capture collaborator. Conversions between layers happen via
//! `From` implementations so `?` composes naturally.
//!
//! Nothing in this crate retries internally: every error is scoped to a
//! single operation on a single order, and retry policy belongs to the
//! caller.

use thiserror::Error;

use crate::order::OrderStatus;
use crate::types::{OrderId, OrderVersion};

/// Result type for order domain operations.
pub type OrderResult<T> = Result<T, OrderError>;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the pricing calculator and the order lifecycle.
///
/// An HTTP adapter would typically map [`OrderError::NotFound`] to 404 and
/// the validation/transition variants to 400; that mapping lives outside
/// this crate.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A line item (or the item list as a whole) failed validation.
    #[error("invalid line item: {0}")]
    InvalidLineItem(String),

    /// The requested status change is not permitted from the current status.
    #[error("invalid transition: order is {from}, cannot move to {to}")]
    InvalidTransition {
        /// Status the order was in when the transition was attempted.
        from: OrderStatus,
        /// Status the caller tried to move the order to.
        to: OrderStatus,
    },

    /// `mark_paid` was called without a usable payment reference.
    #[error("payment reference must not be empty")]
    MissingPaymentReference,

    /// No order exists under the given identifier.
    #[error("order '{0}' not found")]
    NotFound(OrderId),

    /// Another writer modified the order between load and save.
    #[error(
        "concurrent modification of order '{order_id}': expected version {expected}, current version {current}"
    )]
    ConcurrentModification {
        /// The order that was concurrently modified.
        order_id: OrderId,
        /// The version the losing writer was working from.
        expected: OrderVersion,
        /// The version actually stored.
        current: OrderVersion,
    },

    /// Payment capture failed at the external gateway.
    #[error("payment capture failed: {0}")]
    Payment(#[from] PaymentError),

    /// A persistence failure that is not a version conflict or a miss.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for OrderError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(order_id) => Self::NotFound(order_id),
            RepositoryError::VersionConflict {
                order_id,
                expected,
                current,
            } => Self::ConcurrentModification {
                order_id,
                expected,
                current,
            },
            other => Self::Repository(other),
        }
    }
}

/// Errors reported by an [`OrderRepository`](crate::repository::OrderRepository)
/// implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested order was not found.
    #[error("order '{0}' not found")]
    NotFound(OrderId),

    /// An optimistic version check failed on save.
    #[error(
        "version conflict on order '{order_id}': expected {expected}, current {current}"
    )]
    VersionConflict {
        /// The order with the conflicting write.
        order_id: OrderId,
        /// The version the writer expected to replace.
        expected: OrderVersion,
        /// The version currently stored.
        current: OrderVersion,
    },

    /// An I/O error occurred in the backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization of an order failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors reported by the external payment-capture collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The processor refused to capture funds for the order.
    #[error("capture declined: {0}")]
    CaptureDeclined(String),

    /// The processor could not be reached or returned a transport failure.
    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}
