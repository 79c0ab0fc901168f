//! In-memory adapter for the `OrderCore` order domain.
//!
//! This crate provides an in-memory implementation of the `OrderRepository`
//! trait from the ordercore crate, useful for testing and development
//! scenarios where persistence is not required.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use ordercore::errors::{RepositoryError, RepositoryResult};
use ordercore::repository::OrderRepository;
use ordercore::types::{OrderId, OrderVersion};
use ordercore::Order;

/// Thread-safe in-memory order repository for testing.
///
/// The optimistic version check and the write happen under one write lock,
/// so two writers racing on the same order cannot both see the old version:
/// exactly one save succeeds and the other gets a version conflict.
/// Cloning shares storage.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    // Maps order IDs to the latest saved record (which carries its version)
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of orders currently stored.
    pub fn len(&self) -> usize {
        self.orders.read().expect("RwLock poisoned").len()
    }

    /// Whether the repository holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.read().expect("RwLock poisoned").is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn load(&self, id: &OrderId) -> RepositoryResult<Order> {
        let orders = self.orders.read().expect("RwLock poisoned");

        orders
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn save(&self, order: &Order) -> RepositoryResult<OrderVersion> {
        let mut orders = self.orders.write().expect("RwLock poisoned");

        let current = orders
            .get(&order.id)
            .map_or_else(OrderVersion::initial, |stored| stored.version);

        if current != order.version {
            return Err(RepositoryError::VersionConflict {
                order_id: order.id.clone(),
                expected: order.version,
                current,
            });
        }

        let mut stored = order.clone();
        stored.version = order.version.next();
        let version = stored.version;
        orders.insert(stored.id.clone(), stored);

        Ok(version)
    }
}
