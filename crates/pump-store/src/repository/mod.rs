//! # Repository Module
//!
//! One repository per file the pump keeps.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store → Repositories → Files                         │
//! │                                                                         │
//! │  Terminal command                                                      │
//! │       │                                                                 │
//! │       │  store.cards().balance_of("4111...")                           │
//! │       ▼                                                                 │
//! │  CardRepository        ──► card_balances.txt                           │
//! │  TransactionRepository ──► fuel_transactions.txt                       │
//! │  ReceiptRepository     ──► receipts/bill_<billNo>.txt                  │
//! │  UserRepository        ──► users.txt                                   │
//! │                                                                         │
//! │  Repositories hold only a path (plus display settings), so handing     │
//! │  one out is a cheap clone.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CardRepository`](card::CardRepository) - Card balance lookup and update
//! - [`TransactionRepository`](transaction::TransactionRepository) - Ledger append, read, delete
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Receipt rendering and files
//! - [`UserRepository`](user::UserRepository) - Credential check

pub mod card;
pub mod receipt;
pub mod transaction;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use pump_core::billing::{price_fill, settle_card, settle_cash, FillRequest};
    use pump_core::{BillNumber, Litres, Money, Sale};
    use uuid::Uuid;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 41, 7)
            .unwrap()
    }

    /// Diesel, 10 L at 68.30, paid 700.00 cash.
    pub fn cash_sale(bill: u32) -> Sale {
        let fill = price_fill(
            Money::from_cents(6830),
            FillRequest::ByQuantity(Litres::from_whole(10)),
        )
        .unwrap();
        let settlement = settle_cash(fill.total, Money::from_cents(70000)).unwrap();
        Sale::new(
            Uuid::new_v4(),
            BillNumber::new(bill).unwrap(),
            timestamp(),
            "Diesel",
            &fill,
            settlement,
        )
    }

    /// Petrol, 150.00 worth at 72.50, card balance 500.00.
    pub fn card_sale(bill: u32) -> Sale {
        let fill = price_fill(
            Money::from_cents(7250),
            FillRequest::ByAmount(Money::from_cents(15000)),
        )
        .unwrap();
        let settlement = settle_card(
            "4111111111111111",
            fill.total,
            Some(Money::from_cents(50000)),
        )
        .unwrap();
        Sale::new(
            Uuid::new_v4(),
            BillNumber::new(bill).unwrap(),
            timestamp(),
            "Petrol",
            &fill,
            settlement,
        )
    }
}
