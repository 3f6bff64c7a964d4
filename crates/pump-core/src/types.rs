//! # Domain Types
//!
//! Core domain types used throughout the pump terminal.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │   Settlement    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Cash {         │   │  Cash           │       │
//! │  │  bill_number    │   │    tendered,    │   │  Card           │       │
//! │  │  timestamp      │   │    change }     │   └─────────────────┘       │
//! │  │  fuel_type      │   │  Card {         │                              │
//! │  │  quantity       │   │    card_number, │   ┌─────────────────┐       │
//! │  │  rate, total    │   │    deducted,    │   │   BillNumber    │       │
//! │  │  settlement     │   │    remaining }  │   │  100000..999999 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every sale has:
//! - `id`: UUID v4 - immutable reference, printed on the receipt
//! - `bill_number`: 6-digit human-readable number, names the receipt file

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::billing::Fill;
use crate::error::ValidationError;
use crate::money::{Litres, Money};

// =============================================================================
// Bill Number
// =============================================================================

/// A 6-digit bill number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillNumber(u32);

impl BillNumber {
    /// Smallest valid bill number.
    pub const MIN: u32 = 100_000;

    /// Largest valid bill number.
    pub const MAX: u32 = 999_999;

    /// Creates a bill number, `None` outside the 6-digit range.
    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(BillNumber(value))
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BillNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(BillNumber::new)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "bill number".to_string(),
                reason: format!("'{}' is not a 6-digit number", s.trim()),
            })
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Physical cash, change returned.
    Cash,
    /// Stored-value card, debited from the card ledger.
    Card,
}

impl PaymentMethod {
    /// Label written to the ledger and receipts.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// The outcome of a successful tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Settlement {
    /// Cash tendered and change due (always ≥ 0).
    Cash { tendered: Money, change: Money },
    /// Card debited; `remaining_balance` is what the card ledger now holds.
    Card {
        card_number: String,
        deducted: Money,
        remaining_balance: Money,
    },
}

impl Settlement {
    /// Returns the payment method.
    pub fn method(&self) -> PaymentMethod {
        match self {
            Settlement::Cash { .. } => PaymentMethod::Cash,
            Settlement::Card { .. } => PaymentMethod::Card,
        }
    }

    /// Amount handed over: cash tendered, or the card deduction.
    pub fn amount_tendered(&self) -> Money {
        match self {
            Settlement::Cash { tendered, .. } => *tendered,
            Settlement::Card { deducted, .. } => *deducted,
        }
    }

    /// Change due. Always zero for card payments.
    pub fn change_due(&self) -> Money {
        match self {
            Settlement::Cash { change, .. } => *change,
            Settlement::Card { .. } => Money::zero(),
        }
    }

    /// Card balance after the deduction, card payments only.
    pub fn remaining_card_balance(&self) -> Option<Money> {
        match self {
            Settlement::Cash { .. } => None,
            Settlement::Card {
                remaining_balance, ..
            } => Some(*remaining_balance),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed fuel sale.
///
/// Created once at commit time and never mutated. Persisted twice: as a
/// receipt file and as one ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub bill_number: BillNumber,
    pub timestamp: NaiveDateTime,
    pub fuel_type: String,
    pub quantity: Litres,
    /// Rate per litre at time of sale (frozen).
    pub rate: Money,
    pub total: Money,
    pub settlement: Settlement,
}

impl Sale {
    /// Assembles a sale from a priced fill and its settlement.
    pub fn new(
        id: Uuid,
        bill_number: BillNumber,
        timestamp: NaiveDateTime,
        fuel_type: impl Into<String>,
        fill: &Fill,
        settlement: Settlement,
    ) -> Self {
        Sale {
            id,
            bill_number,
            timestamp,
            fuel_type: fuel_type.into(),
            quantity: fill.quantity,
            rate: fill.rate,
            total: fill.total,
            settlement,
        }
    }

    /// Returns the payment method.
    #[inline]
    pub fn payment_method(&self) -> PaymentMethod {
        self.settlement.method()
    }

    /// Returns the formatted timestamp.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(crate::TIMESTAMP_FORMAT).to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_number_range() {
        assert!(BillNumber::new(100_000).is_some());
        assert!(BillNumber::new(999_999).is_some());
        assert!(BillNumber::new(99_999).is_none());
        assert!(BillNumber::new(1_000_000).is_none());
    }

    #[test]
    fn test_bill_number_parse() {
        assert_eq!("482913".parse::<BillNumber>().unwrap().value(), 482_913);
        assert_eq!(" 100000 ".parse::<BillNumber>().unwrap().value(), 100_000);
        assert!("12345".parse::<BillNumber>().is_err());
        assert!("abc".parse::<BillNumber>().is_err());
    }

    #[test]
    fn test_settlement_accessors() {
        let cash = Settlement::Cash {
            tendered: Money::from_cents(70000),
            change: Money::from_cents(1700),
        };
        assert_eq!(cash.method(), PaymentMethod::Cash);
        assert_eq!(cash.amount_tendered(), Money::from_cents(70000));
        assert_eq!(cash.change_due(), Money::from_cents(1700));
        assert_eq!(cash.remaining_card_balance(), None);

        let card = Settlement::Card {
            card_number: "4111".to_string(),
            deducted: Money::from_cents(15000),
            remaining_balance: Money::from_cents(35000),
        };
        assert_eq!(card.method(), PaymentMethod::Card);
        assert_eq!(card.change_due(), Money::zero());
        assert_eq!(card.remaining_card_balance(), Some(Money::from_cents(35000)));
    }
}
