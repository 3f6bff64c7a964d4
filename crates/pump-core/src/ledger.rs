//! # Ledger Line Codec
//!
//! Encodes a [`Sale`] as one transaction-ledger line and parses lines back.
//!
//! ## Line Format
//! ```text
//! 482913 | 2026-10-18 09:41:07 | Diesel | 10.000 L | ₱683.00 | Cash
//! ───┬── ─────────┬───────── ───┬── ────┬─── ───┬─── ──┬─
//!    │            │             │       │        │      └─ payment method
//!    │            │             │       │        └──────── symbol + amount (2 dp)
//!    │            │             │       └───────────────── quantity (3 dp) + " L"
//!    │            │             └───────────────────────── fuel type
//!    │            └─────────────────────────────────────── local timestamp
//!    └──────────────────────────────────────────────────── bill number
//! ```
//!
//! Parsing splits on `|` and trims every field. Lines with fewer than six
//! fields are discarded, so older five-field lines (no payment method) are
//! skipped rather than misread.

use serde::{Deserialize, Serialize};

use crate::money::{Litres, Money};
use crate::types::Sale;
use crate::validation::{parse_litres, parse_money};

/// Number of fields in a ledger line.
pub const FIELD_COUNT: usize = 6;

/// Separator written between fields.
pub const FIELD_SEPARATOR: &str = " | ";

/// Unit suffix written after the quantity.
pub const QUANTITY_UNIT: &str = "L";

/// Encodes a sale as one ledger line (without the trailing newline).
pub fn format_line(sale: &Sale, currency_symbol: &str) -> String {
    [
        sale.bill_number.to_string(),
        sale.timestamp_text(),
        sale.fuel_type.clone(),
        format!("{} {}", sale.quantity, QUANTITY_UNIT),
        sale.total.with_symbol(currency_symbol),
        sale.payment_method().to_string(),
    ]
    .join(FIELD_SEPARATOR)
}

/// One parsed ledger line.
///
/// Fields are kept as the text that was written; numeric accessors parse on
/// demand so a damaged number only affects reports that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub bill_number: String,
    pub timestamp: String,
    pub fuel_type: String,
    pub quantity: String,
    pub amount: String,
    pub payment_method: String,
}

impl LedgerEntry {
    /// Quantity with the unit stripped, `None` if it is not a number.
    pub fn litres(&self) -> Option<Litres> {
        parse_litres(&self.quantity).ok()
    }

    /// Amount with the currency symbol stripped, `None` if it is not a number.
    pub fn money(&self) -> Option<Money> {
        parse_money("amount", &self.amount).ok()
    }

    /// Table cells in column order.
    pub fn cells(&self) -> [&str; FIELD_COUNT] {
        [
            self.bill_number.as_str(),
            self.timestamp.as_str(),
            self.fuel_type.as_str(),
            self.quantity.as_str(),
            self.amount.as_str(),
            self.payment_method.as_str(),
        ]
    }
}

/// Parses one ledger line.
///
/// Returns `None` for blank lines and lines with fewer than six fields.
/// Extra fields beyond the sixth are ignored.
pub fn parse_line(line: &str) -> Option<LedgerEntry> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }
    Some(LedgerEntry {
        bill_number: fields[0].to_string(),
        timestamp: fields[1].to_string(),
        fuel_type: fields[2].to_string(),
        quantity: fields[3].to_string(),
        amount: fields[4].to_string(),
        payment_method: fields[5].to_string(),
    })
}
