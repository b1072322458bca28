//! Fixed-point monetary amount with 2 decimal places.
//!
//! Field 54 of a BR Code carries the amount in reais with exactly two
//! fractional digits and a `.` separator. `Amount` keeps the value in
//! `rust_decimal` so formatting never goes through floating point.

use crate::error::{PixError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount in reais, always held at scale 2.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use pix_brcode::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
///
/// let amount = Amount::from_cents(1999);
/// assert_eq!(amount.to_string(), "19.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount`, rounding half away from zero to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Creates an amount from an integer number of centavos.
    pub fn from_cents(cents: i64) -> Self {
        Amount(Decimal::new(cents, Self::SCALE))
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl TryFrom<f64> for Amount {
    type Error = PixError;

    fn try_from(value: f64) -> Result<Self> {
        Decimal::try_from(value)
            .map(Amount::new)
            .map_err(|e| PixError::InvalidAmount(format!("{}: {}", value, e)))
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|e| PixError::InvalidAmount(format!("{:?}: {}", trimmed, e)))?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
