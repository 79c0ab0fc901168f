//! `OrderCore` - storefront order domain core
//!
//! This library implements the deterministic heart of a storefront backend:
//! a pure pricing calculator (items/shipping/tax/total), a cart built from
//! pure reducers, and an order lifecycle tracker over the one-way path
//! `Created -> Paid -> Delivered`, with optimistic concurrency control at
//! the persistence seam. Transport, schema, and authorization concerns stay
//! with the surrounding application.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cart;
pub mod checkout;
pub mod clock;
pub mod errors;
pub mod money;
pub mod order;
pub mod pricing;
pub mod repository;
pub mod service;
pub mod types;

pub use cart::Cart;
pub use checkout::{capture_and_mark_paid, PaymentGateway};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{OrderError, OrderResult, PaymentError, RepositoryError, RepositoryResult};
pub use money::Money;
pub use order::{Order, OrderStatus};
pub use pricing::{
    compute_breakdown, LineItem, PriceBreakdown, FLAT_SHIPPING_RATE, FREE_SHIPPING_THRESHOLD,
    TAX_RATE,
};
pub use repository::OrderRepository;
pub use service::OrderService;
pub use types::{
    OrderId, OrderVersion, PaymentReference, ProductId, ProductName, Quantity, Timestamp,
};
