//! Type-safe price representation.
//!
//! Prices are stored as whole minor units (cents) so that sums never pick up
//! floating point drift. Conversion to and from the major-unit decimal form
//! used on the wire goes through [`rust_decimal::Decimal`].

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount does not fit in the minor-unit representation.
    #[error("price is too large")]
    Overflow,
}

/// A non-negative price in minor units.
///
/// # Examples
///
/// ```
/// use corner_store_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::from_major(Decimal::new(12, 1)).unwrap(); // 1.2
/// assert_eq!(price.minor_units(), 120);
/// assert_eq!(price.to_string(), "1.20");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor units (e.g. cents).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `minor` is below zero.
    pub const fn from_minor_units(minor: i64) -> Result<Self, PriceError> {
        if minor < 0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(minor))
    }

    /// Create a price from a major-unit decimal amount (e.g. dollars).
    ///
    /// The amount is rounded to two decimal places using banker's rounding.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero and
    /// [`PriceError::Overflow`] if the amount does not fit.
    pub fn from_major(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let minor = amount
            .round_dp(2)
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .and_then(|scaled| scaled.to_i64())
            .ok_or(PriceError::Overflow)?;
        Self::from_minor_units(minor)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Amount in major units with a scale of two.
    #[must_use]
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceError;

    fn try_from(minor: i64) -> Result<Self, Self::Error> {
        Self::from_minor_units(minor)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
