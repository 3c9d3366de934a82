use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use thiserror::Error;

/// A currency amount with cent precision.
///
/// Statement math stays in decimal arithmetic end to end; the only float
/// conversion happens at JSON serialization, after rounding to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

/// An amount token that did not survive decimal parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed amount token: '{0}'")]
pub struct MalformedAmount(pub String);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// Parse a statement amount token.
    ///
    /// Accepts an optional leading sign, an optional `$`, thousands commas,
    /// and accounting parentheses for negatives: `4.75`, `$1,234.56`,
    /// `-$45.00`, `(75.25)`.
    pub fn parse(token: &str) -> Result<Self, MalformedAmount> {
        let s = token.trim();
        let (negated, s) = if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
            (true, &s[1..s.len() - 1])
        } else {
            (false, s)
        };
        let cleaned = s.replace(['$', ',', ' '], "");
        let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
        let mut dec =
            Decimal::from_str(cleaned).map_err(|_| MalformedAmount(token.to_string()))?;
        if negated {
            dec = -dec;
        }
        Ok(Money(dec.round_dp(2)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", -self.0)
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

// Serialized as a plain JSON number so downstream consumers read amounts
// without a decimal-string convention.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.round_dp(2).to_f64() {
            Some(v) => serializer.serialize_f64(v),
            None => Err(serde::ser::Error::custom("amount out of f64 range")),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;
        let dec = Decimal::from_f64(v)
            .ok_or_else(|| serde::de::Error::custom("amount out of decimal range"))?;
        Ok(Money(dec.round_dp(2)))
    }
}
