//! # Rate Table
//!
//! Maps fuel-type names to a price per litre.
//!
//! Lookups return an explicit `Option` so "not configured" can never be
//! confused with a real price.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_fuel_name;

/// Default rates: (fuel, centavos per litre).
const DEFAULT_RATES: &[(&str, i64)] = &[
    ("Petrol", 7250),
    ("Diesel", 6830),
    ("CNG", 6500),
    ("LPG", 5875),
    ("Electric", 1200),
    ("Biodiesel", 7000),
    ("E85", 7400),
    ("Premium Gasoline", 7890),
    ("Unleaded Gasoline", 7250),
];

/// Fuel name → rate per litre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<String, Money>,
}

impl RateTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        RateTable {
            rates: BTreeMap::new(),
        }
    }

    /// Builds a table from configured decimal rates.
    ///
    /// ## Rules
    /// - Fuel names must be valid ledger text (see [`validate_fuel_name`])
    /// - Every rate must be positive
    pub fn from_decimals(rates: &BTreeMap<String, Decimal>) -> CoreResult<Self> {
        let mut table = RateTable::empty();
        for (fuel, rate) in rates {
            let rate = Money::from_decimal(*rate).ok_or_else(|| ValidationError::TooLarge {
                field: format!("rate for {}", fuel),
            })?;
            table.insert(fuel, rate)?;
        }
        Ok(table)
    }

    /// Adds or replaces a rate.
    pub fn insert(&mut self, fuel: &str, rate: Money) -> CoreResult<()> {
        validate_fuel_name(fuel)?;
        if !rate.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: format!("rate for {}", fuel),
            }
            .into());
        }
        self.rates.insert(fuel.trim().to_string(), rate);
        Ok(())
    }

    /// Returns the configured rate for `fuel`, if any.
    pub fn rate_for(&self, fuel: &str) -> Option<Money> {
        self.rates.get(fuel.trim()).copied()
    }

    /// Default rates as decimals, the shape the config file uses.
    pub fn default_decimals() -> BTreeMap<String, Decimal> {
        DEFAULT_RATES
            .iter()
            .map(|(fuel, cents)| (fuel.to_string(), Decimal::new(*cents, 2)))
            .collect()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            rates: DEFAULT_RATES
                .iter()
                .map(|(fuel, cents)| (fuel.to_string(), Money::from_cents(*cents)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_default_rates() {
        let table = RateTable::default();
        assert_eq!(table.rate_for("Diesel"), Some(Money::from_cents(6830)));
        assert_eq!(table.rate_for("Petrol"), Some(Money::from_cents(7250)));
        assert_eq!(table.rate_for(" Diesel "), Some(Money::from_cents(6830)));
    }

    #[test]
    fn test_unknown_fuel() {
        let table = RateTable::default();
        assert_eq!(table.rate_for("Kerosene"), None);
    }

    #[test]
    fn test_from_decimals_rejects_zero_rate() {
        let mut rates = BTreeMap::new();
        rates.insert("Diesel".to_string(), Decimal::ZERO);
        let err = RateTable::from_decimals(&rates).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_from_decimals_round_trip_defaults() {
        let table = RateTable::from_decimals(&RateTable::default_decimals()).unwrap();
        assert_eq!(table, RateTable::default());
    }

    #[test]
    fn test_insert_rejects_pipe_in_name() {
        let mut table = RateTable::empty();
        assert!(table.insert("Die|sel", Money::from_cents(100)).is_err());
    }
}
