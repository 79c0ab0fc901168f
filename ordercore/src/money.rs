//! Money amounts with precise decimal arithmetic.
//!
//! Built on `rust_decimal` to avoid floating point drift in price
//! calculations. Amounts are non-negative with at most 2 fraction digits;
//! rounding, where it happens, is always half-up to the cent
//! (`MidpointAwayFromZero`, which is identical to half-up for the
//! non-negative amounts this domain permits).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::errors::OrderError;
use crate::types::Quantity;

/// A non-negative currency amount with at most 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Maximum representable amount (100 million).
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

    /// The zero amount.
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create money from a whole number of cents.
    pub fn from_cents(cents: u64) -> Result<Self, OrderError> {
        let decimal = Decimal::new(
            i64::try_from(cents).map_err(|_| {
                OrderError::InvalidLineItem(format!("amount {cents} cents is out of range"))
            })?,
            2,
        );
        Self::new(decimal)
    }

    /// Create money from a decimal amount, rejecting negative values, more
    /// than 2 decimal places, and amounts over [`Self::MAX_AMOUNT`].
    pub fn new(amount: Decimal) -> Result<Self, OrderError> {
        if amount.is_sign_negative() {
            return Err(OrderError::InvalidLineItem(format!(
                "money amount cannot be negative: {amount}"
            )));
        }
        if amount.round_dp(2) != amount {
            return Err(OrderError::InvalidLineItem(format!(
                "money amount cannot have more than 2 decimal places: {amount}"
            )));
        }
        if amount > Self::MAX_AMOUNT {
            return Err(OrderError::InvalidLineItem(format!(
                "money amount {} exceeds maximum {}",
                amount,
                Self::MAX_AMOUNT
            )));
        }
        Ok(Self(amount))
    }

    /// Create money from an unrounded decimal, rounding half-up to the cent
    /// first. This is the entry point the pricing calculator uses for
    /// derived amounts (subtotal, tax).
    pub fn from_decimal_rounded(amount: Decimal) -> Result<Self, OrderError> {
        Self::new(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// The underlying decimal value.
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount as a whole number of cents.
    pub fn to_cents(&self) -> u64 {
        (self.0 * Decimal::from(100)).to_u64().unwrap_or(0)
    }

    /// Whether this is the zero amount.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two amounts, re-validating the result.
    pub fn checked_add(self, other: Self) -> Result<Self, OrderError> {
        Self::new(self.0 + other.0)
    }

    /// Multiply a unit price by a line-item quantity.
    pub fn multiply_by_quantity(self, quantity: Quantity) -> Result<Self, OrderError> {
        Self::new(self.0 * Decimal::from(quantity.value()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl std::str::FromStr for Money {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount_str = trimmed
            .strip_prefix('$')
            .map_or(trimmed, |stripped| stripped);

        let decimal = amount_str.parse::<Decimal>().map_err(|e| {
            OrderError::InvalidLineItem(format!("failed to parse money amount '{s}': {e}"))
        })?;

        Self::new(decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_negative_amounts() {
        assert!(Money::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn rejects_sub_cent_precision() {
        assert!(Money::new(dec!(1.001)).is_err());
        assert!(Money::new(dec!(1.01)).is_ok());
    }

    #[test]
    fn rejects_amounts_over_maximum() {
        assert!(Money::new(dec!(100000000.01)).is_err());
        assert!(Money::new(dec!(100000000.00)).is_ok());
    }

    #[test]
    fn accepts_wider_scale_with_trailing_zeros() {
        // 9.0000 is numerically 2dp even though its scale is 4
        assert_eq!(Money::new(dec!(9.0000)).unwrap().to_cents(), 900);
    }

    #[test]
    fn from_decimal_rounded_rounds_half_up() {
        assert_eq!(Money::from_decimal_rounded(dec!(1.005)).unwrap().to_cents(), 101);
        assert_eq!(Money::from_decimal_rounded(dec!(1.004)).unwrap().to_cents(), 100);
        assert_eq!(Money::from_decimal_rounded(dec!(1.015)).unwrap().to_cents(), 102);
    }

    #[test]
    fn multiply_by_quantity_is_exact() {
        let price = Money::from_cents(2599).unwrap();
        let qty = Quantity::new(3).unwrap();
        assert_eq!(price.multiply_by_quantity(qty).unwrap().to_cents(), 7797);
    }

    #[test]
    fn parses_with_and_without_dollar_sign() {
        assert_eq!("$10.50".parse::<Money>().unwrap().to_cents(), 1050);
        assert_eq!("25.99".parse::<Money>().unwrap().to_cents(), 2599);
        assert!("invalid".parse::<Money>().is_err());
        assert!("-5.00".parse::<Money>().is_err());
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::from_cents(1050).unwrap().to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    proptest! {
        #[test]
        fn prop_from_cents_roundtrip(cents in 0u64..1_000_000_000) {
            let money = Money::from_cents(cents).unwrap();
            prop_assert_eq!(money.to_cents(), cents);
        }

        #[test]
        fn prop_addition_is_commutative(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let ma = Money::from_cents(a).unwrap();
            let mb = Money::from_cents(b).unwrap();
            prop_assert_eq!(
                ma.checked_add(mb).unwrap(),
                mb.checked_add(ma).unwrap()
            );
        }

        #[test]
        fn prop_rounding_never_moves_more_than_half_a_cent(
            units in 0i64..10_000_000, scale in 2u32..=6
        ) {
            let raw = Decimal::new(units, scale);
            let rounded = Money::from_decimal_rounded(raw).unwrap();
            let diff = (rounded.amount() - raw).abs();
            prop_assert!(diff <= dec!(0.005));
        }
    }
}
