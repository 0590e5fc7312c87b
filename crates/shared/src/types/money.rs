//! Money type with exact two-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`, and every value leaving a
//! calculation goes through [`round2`] so it carries exactly two fractional
//! digits (satang).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a value to exactly two decimal places, midpoint away from zero.
///
/// This is the single rounding primitive of the system. Banker's rounding is
/// NOT used: `0.125` becomes `0.13` and `-0.125` becomes `-0.13`.
///
/// The result is always rescaled to two digits, so `round2(dec!(7))`
/// displays as `7.00`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use thaibooks_shared::types::money::round2;
///
/// assert_eq!(round2(dec!(2.675)).to_string(), "2.68");
/// assert_eq!(round2(dec!(100)).to_string(), "100.00");
/// ```
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// A monetary amount in Thai Baht with exactly two decimal places.
///
/// The constructor always rounds, so a `Money` can never hold more precision
/// than satang. Arithmetic between two `Money` values stays exact, and
/// saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a new amount, rounding the input with [`round2`].
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(round2(amount))
    }

    /// Zero baht (`0.00`).
    #[must_use]
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Returns the underlying decimal (always scale 2).
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
