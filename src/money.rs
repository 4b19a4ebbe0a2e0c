//! Fixed-point monetary amount.
//!
//! Amounts are held at 4 decimal places so that intermediate results such
//! as monthly payments keep sub-cent precision, and are rounded to cents
//! (half away from zero) whenever they are displayed or serialized.
//!
//! Arithmetic saturates at [`Money::MAX`] / [`Money::MIN`] instead of
//! panicking, so pricing stays total for any catalog and quantity.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// A monetary amount with exactly 4 decimal places of internal precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use alarm_quote::Money;
///
/// let price = Money::from_str("19.995").unwrap();
/// assert_eq!(price.to_string(), "20.00");
/// assert_eq!((price * 2).to_string(), "39.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Internal number of decimal places.
    pub const SCALE: u32 = 4;

    /// Decimal places used for display and serialization.
    pub const CENTS_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Largest representable amount; overflowing arithmetic ends here.
    pub const MAX: Self = Money(Decimal::MAX);

    /// Smallest representable amount.
    pub const MIN: Self = Money(Decimal::MIN);

    /// Creates a new `Money`, rounding to 4 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Returns the underlying decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to cents, with exactly 2 decimal places.
    pub fn cents(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(Self::CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::CENTS_SCALE);
        rounded
    }

    /// Creates a `Money` only if `value` needs no rounding to fit in
    /// 4 decimal places.
    pub fn exact(value: Decimal) -> Option<Self> {
        if value.normalize().scale() > Self::SCALE {
            None
        } else {
            Some(Money::new(value))
        }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money::new)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money::new)
    }

    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money::new)
    }

    /// Returns a copy rounded to whole cents.
    pub fn round_to_cents(self) -> Self {
        Money::new(self.cents())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cents())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or(if rhs.is_negative() {
            Money::MIN
        } else {
            Money::MAX
        })
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).unwrap_or(if rhs.is_negative() {
            Money::MAX
        } else {
            Money::MIN
        })
    }
}

/// Unit price times quantity.
impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        self.checked_mul(quantity).unwrap_or(if self.is_negative() {
            Money::MIN
        } else {
            Money::MAX
        })
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.cents().to_string())
    }
}

/// Accepts JSON numbers as well as decimal strings; catalog endpoints
/// send prices as plain numbers. Extra decimal places are rounded.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor { exact: false })
    }
}

/// Like the `Deserialize` impl, but rejects values with more than
/// 4 decimal places instead of rounding them.
pub fn deserialize_exact<'de, D>(deserializer: D) -> std::result::Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(MoneyVisitor { exact: true })
}

/// Serializes an amount as a plain JSON number, e.g. `2.7789`.
pub fn serialize_number<S>(money: &Money, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serialize_decimal_number(&money.0, serializer)
}

/// Serializes a decimal as the JSON number closest to its decimal text.
pub fn serialize_decimal_number<S>(
    value: &Decimal,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number = f64::from_str(&value.to_string()).map_err(S::Error::custom)?;
    serializer.serialize_f64(number)
}

struct MoneyVisitor {
    exact: bool,
}

impl MoneyVisitor {
    fn decimal<E: de::Error>(&self, value: Decimal) -> std::result::Result<Money, E> {
        if !self.exact {
            return Ok(Money::new(value));
        }
        Money::exact(value).ok_or_else(|| {
            E::custom(format!(
                "amount {} has more than {} decimal places",
                value,
                Money::SCALE
            ))
        })
    }
}

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Money, E> {
        self.decimal(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Money, E> {
        self.decimal(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Money, E> {
        // Shortest round-trip representation, so 19.99 stays 19.99.
        self.visit_str(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Money, E> {
        let value = Decimal::from_str(v.trim()).map_err(E::custom)?;
        self.decimal(value)
    }
}
