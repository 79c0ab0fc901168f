//! Core identifier and value types for the order domain.
//!
//! All types use smart constructors so that a value, once constructed, is
//! always valid, and no further validation is needed downstream ("parse, don't
//! validate").

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::errors::OrderError;

/// Order identifier.
///
/// Format: `ORD-{UPPERCASE_ALPHANUMERIC}`, e.g. `ORD-A1B2C3D4`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50, regex = r"^ORD-[A-Z0-9]+$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh order ID from a UUIDv7, so ids created in sequence
    /// sort roughly by creation time.
    pub fn generate() -> Self {
        let uuid = Uuid::now_v7().simple().to_string().to_uppercase();
        Self::try_new(format!("ORD-{}", &uuid[..8])).expect("generated OrderId should be valid")
    }
}

/// Product identifier.
///
/// Format: `PRD-{UPPERCASE_ALPHANUMERIC}`, e.g. `PRD-LAPTOP01`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50, regex = r"^PRD-[A-Z0-9]+$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ProductId(String);

impl ProductId {
    /// Generate a fresh product ID from a UUIDv7.
    pub fn generate() -> Self {
        let uuid = Uuid::now_v7().simple().to_string().to_uppercase();
        Self::try_new(format!("PRD-{}", &uuid[..8])).expect("generated ProductId should be valid")
    }
}

/// Product display name as captured on a line item.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ProductName(String);

/// Opaque reference returned by the payment processor confirming capture.
///
/// Guaranteed non-empty; an empty reference is rejected at the service
/// boundary with `MissingPaymentReference` before any state changes.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct PaymentReference(String);

/// Quantity of a product on a line item.
///
/// Must be at least 1, at most 1000 per line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    /// Maximum quantity per line item.
    pub const MAX_QUANTITY: u32 = 1000;

    /// Create a new quantity.
    pub fn new(value: u32) -> Result<Self, OrderError> {
        if value == 0 {
            return Err(OrderError::InvalidLineItem(
                "quantity must be greater than 0".to_string(),
            ));
        }
        if value > Self::MAX_QUANTITY {
            return Err(OrderError::InvalidLineItem(format!(
                "quantity {} exceeds maximum {}",
                value,
                Self::MAX_QUANTITY
            )));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Add quantities, checking the per-item maximum.
    pub fn checked_add(self, other: Self) -> Result<Self, OrderError> {
        let value = self
            .0
            .checked_add(other.0)
            .ok_or_else(|| OrderError::InvalidLineItem("quantity overflow".to_string()))?;
        Self::new(value)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The version of an order record, used for optimistic concurrency control.
///
/// Versions start at 0 on creation and increment on every successful save.
#[nutype(
    validate(greater_or_equal = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct OrderVersion(u64);

impl OrderVersion {
    /// The version a freshly created, never-saved order carries.
    pub fn initial() -> Self {
        Self::try_new(0).expect("0 is always a valid version")
    }

    /// Returns the next version after this one.
    #[must_use]
    pub fn next(self) -> Self {
        let current: u64 = self.into();
        Self::try_new(current + 1).expect("next version should always be valid")
    }
}

/// A point in time recorded on an order (creation, payment, delivery).
///
/// Wraps a UTC `DateTime` so the crate controls construction and
/// serialization; production code obtains these through a
/// [`Clock`](crate::clock::Clock) rather than calling `now` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from a UTC `DateTime`.
    pub const fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying `DateTime`.
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
