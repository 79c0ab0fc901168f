//! Persistence seam for orders.
//!
//! The domain core only needs `load` and `save`; everything else (schemas,
//! connections, listing, administrative deletion) belongs to the adapter.
//! `save` performs an optimistic version check so that two writers racing on
//! the same order cannot both succeed; see `ordercore-memory` for the
//! reference implementation.

use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::order::Order;
use crate::types::{OrderId, OrderVersion};

/// Storage abstraction for order records.
///
/// Implementations must serialize concurrent saves of the *same* order
/// identifier (rejecting stale writers with
/// [`RepositoryError::VersionConflict`](crate::errors::RepositoryError::VersionConflict)),
/// while saves of different orders stay fully independent.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Load an order by id.
    ///
    /// Fails with [`RepositoryError::NotFound`](crate::errors::RepositoryError::NotFound)
    /// if no order exists under the identifier.
    async fn load(&self, id: &OrderId) -> RepositoryResult<Order>;

    /// Persist an order, enforcing optimistic concurrency control.
    ///
    /// The stored record's version must equal `order.version` (or the order
    /// must be absent and `order.version` initial); otherwise the save fails
    /// with a version conflict and nothing is written. On success the stored
    /// copy carries the returned, incremented version.
    async fn save(&self, order: &Order) -> RepositoryResult<OrderVersion>;
}
