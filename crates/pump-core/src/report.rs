//! # Sales Summary
//!
//! Aggregates ledger entries per fuel type.
//!
//! ```text
//! ledger lines ──► parse_line ──► SalesSummary::record
//!                                   ├── litres + amount parse → add to fuel and total
//!                                   └── parse fails/overflow  → skipped += 1
//! ```
//!
//! Fuels are kept in name order so the printed summary is stable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ledger::LedgerEntry;
use crate::money::{Litres, Money};

/// Running totals for one fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FuelTotals {
    pub sales: usize,
    pub litres: Litres,
    pub amount: Money,
}

impl FuelTotals {
    /// Totals with one more sale, `None` if either sum overflows.
    fn plus(&self, litres: Litres, amount: Money) -> Option<FuelTotals> {
        Some(FuelTotals {
            sales: self.sales + 1,
            litres: self.litres.checked_add(litres)?,
            amount: self.amount.checked_add(amount)?,
        })
    }
}

/// Per-fuel totals over a set of ledger entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    by_fuel: BTreeMap<String, FuelTotals>,
    total: FuelTotals,
    skipped: usize,
}

impl SalesSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a summary from entries.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut summary = Self::new();
        for entry in entries {
            summary.record(entry);
        }
        summary
    }

    /// Adds one entry. Returns `false` (and counts it as skipped) when the
    /// quantity or amount cannot be read, or would overflow a running total.
    pub fn record(&mut self, entry: &LedgerEntry) -> bool {
        let (Some(litres), Some(amount)) = (entry.litres(), entry.money()) else {
            self.skipped += 1;
            return false;
        };

        let fuel = self
            .by_fuel
            .get(&entry.fuel_type)
            .copied()
            .unwrap_or_default();
        let (Some(fuel), Some(total)) = (
            fuel.plus(litres, amount),
            self.total.plus(litres, amount),
        ) else {
            self.skipped += 1;
            return false;
        };

        self.by_fuel.insert(entry.fuel_type.clone(), fuel);
        self.total = total;
        true
    }

    /// Iterates fuels in name order.
    pub fn fuels(&self) -> impl Iterator<Item = (&str, &FuelTotals)> {
        self.by_fuel.iter().map(|(fuel, totals)| (fuel.as_str(), totals))
    }

    /// Totals for one fuel.
    pub fn get(&self, fuel: &str) -> Option<&FuelTotals> {
        self.by_fuel.get(fuel)
    }

    /// Totals across every fuel.
    pub fn grand_total(&self) -> FuelTotals {
        self.total
    }

    /// Checks if no entry was counted.
    pub fn is_empty(&self) -> bool {
        self.by_fuel.is_empty()
    }

    /// Number of entries that could not be read.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_line;
    use rust_decimal::Decimal;

    fn entries(lines: &[&str]) -> Vec<LedgerEntry> {
        lines.iter().filter_map(|line| parse_line(line)).collect()
    }

    #[test]
    fn test_summary_groups_by_fuel() {
        let entries = entries(&[
            "100001 | 2026-10-18 09:00:00 | Diesel | 10.000 L | ₱683.00 | Cash",
            "100002 | 2026-10-18 09:05:00 | Petrol | 1.379 L | ₱100.00 | Card",
            "100003 | 2026-10-18 09:10:00 | Diesel | 2.500 L | ₱170.75 | Card",
        ]);
        let summary = SalesSummary::from_entries(&entries);

        let diesel = summary.get("Diesel").unwrap();
        assert_eq!(diesel.sales, 2);
        assert_eq!(diesel.litres, Litres::new(Decimal::new(12500, 3)));
        assert_eq!(diesel.amount, Money::from_cents(85375));

        let fuels: Vec<&str> = summary.fuels().map(|(fuel, _)| fuel).collect();
        assert_eq!(fuels, vec!["Diesel", "Petrol"]);

        let total = summary.grand_total();
        assert_eq!(total.sales, 3);
        assert_eq!(total.amount, Money::from_cents(95375));
        assert_eq!(summary.skipped(), 0);
    }

    #[test]
    fn test_summary_skips_unreadable_entries() {
        let entries = entries(&[
            "100001 | 2026-10-18 09:00:00 | Diesel | 10.000 L | ₱683.00 | Cash",
            "100002 | 2026-10-18 09:05:00 | Diesel | ten L | ₱100.00 | Cash",
        ]);
        let summary = SalesSummary::from_entries(&entries);
        assert_eq!(summary.get("Diesel").unwrap().sales, 1);
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_summary_skips_amounts_that_would_overflow() {
        let entries = entries(&[
            "100001 | 2026-10-18 09:00:00 | Diesel | 1.000 L | ₱90000000000000000.00 | Cash",
            "100002 | 2026-10-18 09:05:00 | Diesel | 1.000 L | ₱90000000000000000.00 | Cash",
            "100003 | 2026-10-18 09:10:00 | Petrol | 1.000 L | ₱90000000000000000.00 | Cash",
            "100004 | 2026-10-18 09:15:00 | Petrol | 2.000 L | ₱100.00 | Cash",
        ]);
        let summary = SalesSummary::from_entries(&entries);

        let diesel = summary.get("Diesel").unwrap();
        assert_eq!(diesel.sales, 1);
        assert_eq!(diesel.amount, Money::from_cents(9_000_000_000_000_000_000));

        // Fits on its own fuel but not in the grand total.
        let petrol = summary.get("Petrol").unwrap();
        assert_eq!(petrol.sales, 1);
        assert_eq!(petrol.amount, Money::from_cents(10000));

        assert_eq!(summary.skipped(), 2);
        let total = summary.grand_total();
        assert_eq!(total.sales, 2);
        assert_eq!(total.amount, Money::from_cents(9_000_000_000_000_010_000));
    }

    #[test]
    fn test_empty_summary() {
        let summary = SalesSummary::new();
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total(), FuelTotals::default());
    }
}
