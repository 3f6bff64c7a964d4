//! # Money Module
//!
//! Provides the `Money` type for monetary values and `Litres` for fuel
//! quantities.
//!
//! ## Why Two Representations?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MONEY vs LITRES                                                        │
//! │                                                                         │
//! │  Money is always settled to the centavo:                                │
//! │    683.00 → 68300 centavos (i64), exact add/subtract                   │
//! │                                                                         │
//! │  Litres are NOT rounded when derived from an amount:                    │
//! │    100.00 / 72.50 = 1.3793103448275862068965517241 L                   │
//! │    (rounding here first would make the amount drift)                   │
//! │                                                                         │
//! │  Conversions between the two always go through rust_decimal, never     │
//! │  through f64.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pump_core::money::{Litres, Money};
//!
//! let rate = Money::from_cents(7250); // 72.50 per litre
//! let litres = Litres::purchasable(Money::from_cents(10000), rate).unwrap();
//! assert_eq!(litres.cost_at(rate), Some(Money::from_cents(10000)));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (1/100 of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences can be negative before validation rejects them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No symbol in Display**: the station's currency symbol is applied by
///   whoever renders the value
///
/// ## Where Money is Used
/// ```text
/// RateTable ──► rate per litre ──┬──► Fill.total ──► Settlement ──► Sale
///                                │
///                                └──► minimum fill-by-amount
///
/// Card ledger balance ──► InsufficientBalance check ──► remaining balance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use pump_core::money::Money;
    ///
    /// let rate = Money::from_cents(6830); // 68.30
    /// assert_eq!(rate.cents(), 6830);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates Money from a decimal, rounding to 2 places (midpoint away
    /// from zero).
    ///
    /// Returns `None` when the value does not fit in i64 centavos.
    ///
    /// ## Example
    /// ```rust
    /// use pump_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let money = Money::from_decimal(Decimal::new(68305, 3)).unwrap(); // 68.305
    /// assert_eq!(money.cents(), 6831);
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Returns the value as an exact decimal with 2 places.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats with a leading currency symbol, e.g. `₱683.00`.
    ///
    /// ## Example
    /// ```rust
    /// use pump_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(68300).with_symbol("₱"), "₱683.00");
    /// assert_eq!(Money::from_cents(-550).with_symbol("₱"), "-₱5.50");
    /// ```
    pub fn with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.whole().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_symbol(""))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Litres
// =============================================================================

/// A fuel quantity in litres.
///
/// Kept at full decimal precision. Only rendering rounds (to 3 places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Litres(Decimal);

impl Litres {
    /// Exactly one litre, the minimum sale.
    pub const ONE: Litres = Litres(Decimal::ONE);

    /// Zero litres.
    pub const ZERO: Litres = Litres(Decimal::ZERO);

    /// Wraps a decimal quantity.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Litres(value)
    }

    /// Whole number of litres.
    pub fn from_whole(litres: i64) -> Self {
        Litres(Decimal::from(litres))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the quantity is positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Quantity purchasable for `amount` at `rate`, unrounded.
    ///
    /// Returns `None` for a zero rate.
    pub fn purchasable(amount: Money, rate: Money) -> Option<Litres> {
        amount.to_decimal().checked_div(rate.to_decimal()).map(Litres)
    }

    /// Cost of this quantity at `rate`, rounded to the centavo.
    ///
    /// Returns `None` on overflow.
    pub fn cost_at(&self, rate: Money) -> Option<Money> {
        Money::from_decimal(self.0.checked_mul(rate.to_decimal())?)
    }

    /// Adds two quantities, `None` on overflow.
    pub fn checked_add(&self, other: Litres) -> Option<Litres> {
        self.0.checked_add(other.0).map(Litres)
    }
}

/// Three-decimal rendering, e.g. `10.000`.
impl fmt::Display for Litres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.3}", rounded)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(6830);
        assert_eq!(money.cents(), 6830);
        assert_eq!(money.whole(), 68);
        assert_eq!(money.cents_part(), 30);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(68300).to_string(), "683.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(1700).with_symbol("₱"), "₱17.00");
    }

    #[test]
    fn test_arithmetic() {
        let mut balance = Money::from_cents(50000);
        balance -= Money::from_cents(15000);
        assert_eq!(balance, Money::from_cents(35000));
        assert_eq!((balance + Money::from_cents(100)).cents(), 35100);
    }

    #[test]
    fn test_checked_add_overflow() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(big.checked_add(Money::from_cents(2)), None);
    }

    #[test]
    fn test_from_decimal_rounds_midpoint_away_from_zero() {
        assert_eq!(Money::from_decimal(Decimal::new(1005, 3)), Some(Money::from_cents(101)));
        assert_eq!(Money::from_decimal(Decimal::new(1004, 3)), Some(Money::from_cents(100)));
        assert_eq!(Money::from_decimal(Decimal::new(-1005, 3)), Some(Money::from_cents(-101)));
        assert_eq!(Money::from_decimal(Decimal::MAX), None);
    }

    #[test]
    fn test_litres_display_three_places() {
        assert_eq!(Litres::from_whole(10).to_string(), "10.000");
        let litres = Litres::purchasable(Money::from_cents(10000), Money::from_cents(7250)).unwrap();
        assert_eq!(litres.to_string(), "1.379");
    }

    #[test]
    fn test_purchasable_keeps_full_precision() {
        let rate = Money::from_cents(7250);
        let litres = Litres::purchasable(Money::from_cents(10000), rate).unwrap();
        // Unrounded quantity converts back to the exact amount.
        assert_eq!(litres.cost_at(rate), Some(Money::from_cents(10000)));
        assert!(litres.value().scale() > 3);
    }

    #[test]
    fn test_purchasable_zero_rate() {
        assert_eq!(Litres::purchasable(Money::from_cents(100), Money::zero()), None);
    }

    #[test]
    fn test_cost_at_rounds_to_centavo() {
        // 1.005 L × 1.00 = 1.005 → 1.01
        let litres = Litres::new(Decimal::new(1005, 3));
        assert_eq!(litres.cost_at(Money::from_cents(100)), Some(Money::from_cents(101)));
    }
}
