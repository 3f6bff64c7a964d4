//! # pump-store: Flat-File Persistence for the Petrol Pump
//!
//! This crate owns every file the pump terminal reads or writes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Petrol Pump Data Flow                            │
//! │                                                                         │
//! │  Terminal purchase command                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pump-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │     Bill     │  │   │
//! │  │   │  (store.rs)   │    │               │    │  allocation  │  │   │
//! │  │   │               │    │ CardRepo      │    │  (bill.rs)   │  │   │
//! │  │   │ StoreConfig   │◄───│ TxnRepo       │    │              │  │   │
//! │  │   │ data_dir      │    │ ReceiptRepo   │    │ random 6-dig │  │   │
//! │  │   │               │    │ UserRepo      │    │ + collision  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Data Directory                              │   │
//! │  │   fuel_transactions.txt  card_balances.txt  users.txt  receipts/│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Data directory layout and the `Store` handle
//! - [`repository`] - One repository per file
//! - [`bill`] - Bill number allocation
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pump_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./pump_data"))?;
//!
//! let balance = store.cards().balance_of("4111111111111111")?;
//! let sale = store.record_sale("Diesel", &fill, settlement)?;
//! let history = store.transactions().entries()?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::card::CardRepository;
pub use repository::receipt::ReceiptRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::user::{hash_password, UserRepository};
