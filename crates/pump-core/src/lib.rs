//! # pump-core: Pure Billing Logic for the Petrol Pump
//!
//! This crate is the **heart** of the pump terminal. It contains every
//! financial rule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Petrol Pump Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal (apps/terminal)                     │   │
//! │  │    Menu ──► Fill Mode ──► Tender ──► Confirmation ──► Reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pump-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   rates   │  │  billing  │  │  ledger   │  │   │
//! │  │   │   Money   │  │ RateTable │  │ price_fill│  │ format /  │  │   │
//! │  │   │  Litres   │  │           │  │ settle_*  │  │ parse     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pump-store (Flat-File Layer)                    │   │
//! │  │        card balances, transaction ledger, receipts, users       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` (integer centavos) and `Litres` (exact decimal)
//! - [`types`] - Domain types (Sale, Settlement, BillNumber, PaymentMethod)
//! - [`rates`] - Fuel rate table
//! - [`billing`] - Fill-mode conversion and tender settlement
//! - [`ledger`] - Transaction ledger line codec
//! - [`report`] - Sales summary aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and validation
//!
//! ## Example Usage
//!
//! ```rust
//! use pump_core::billing::{price_fill, settle_cash, FillRequest};
//! use pump_core::money::{Litres, Money};
//!
//! // Diesel at 68.30 per litre, 10 litres requested
//! let rate = Money::from_cents(6830);
//! let fill = price_fill(rate, FillRequest::ByQuantity(Litres::from_whole(10))).unwrap();
//! assert_eq!(fill.total, Money::from_cents(68300));
//!
//! // Customer hands over 700.00
//! let settlement = settle_cash(fill.total, Money::from_cents(70000)).unwrap();
//! assert_eq!(settlement.change_due(), Money::from_cents(1700));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod ledger;
pub mod money;
pub mod rates;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Litres, Money};
pub use rates::RateTable;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default currency symbol printed on receipts and in the ledger.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

/// Timestamp layout shared by receipts, the ledger, and the confirmation screen.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
