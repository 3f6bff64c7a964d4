//! # Store Handle
//!
//! Data directory layout and the [`Store`] handle that hands out
//! repositories.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Data Directory                                     │
//! │                                                                         │
//! │  <data_dir>/                                                           │
//! │  ├── fuel_transactions.txt    append-only ledger                       │
//! │  ├── card_balances.txt        cardNumber,balance                       │
//! │  ├── users.txt                username,sha256hex                       │
//! │  └── receipts/                                                         │
//! │      ├── bill_482913.txt                                               │
//! │      └── bill_100001.txt                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Order
//! ```text
//! record_sale(fuel, fill, settlement)
//!   │
//!   ├── 1. allocate bill number (not in receipts/, not in ledger)
//!   ├── 2. write receipts/bill_<n>.txt (never overwrites)
//!   ├── 3. card payment → write the new card balance
//!   │        failed → discard receipt
//!   └── 4. append ledger line
//!            failed → restore card balance, discard receipt
//! ```
//!
//! A failed commit leaves no receipt, no ledger line, and the card at its
//! pre-sale balance.

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::bill::{self, DEFAULT_BILL_ATTEMPTS};
use crate::error::{StoreError, StoreResult};
use crate::repository::card::CardRepository;
use crate::repository::receipt::ReceiptRepository;
use crate::repository::transaction::TransactionRepository;
use crate::repository::user::UserRepository;
use pump_core::billing::Fill;
use pump_core::{BillNumber, Sale, Settlement, DEFAULT_CURRENCY_SYMBOL};

/// Ledger file name.
pub const LEDGER_FILE: &str = "fuel_transactions.txt";

/// Card balance file name.
pub const CARDS_FILE: &str = "card_balances.txt";

/// Credential file name.
pub const USERS_FILE: &str = "users.txt";

/// Receipt directory name.
pub const RECEIPTS_DIR: &str = "receipts";

/// Station name printed when none is configured.
pub const DEFAULT_STATION_NAME: &str = "HP Petrol Pump";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use pump_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/petrol-pump")
///     .station_name("Shell Katipunan")
///     .currency_symbol("₱");
/// assert!(config.ledger_path().ends_with("fuel_transactions.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding every pump file.
    pub data_dir: PathBuf,

    /// Printed at the top of each receipt.
    pub station_name: String,

    /// Prefix for amounts in the ledger and on receipts.
    pub currency_symbol: String,

    /// Bill number candidates tried per sale.
    /// Default: 1000
    pub bill_attempts: u32,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            station_name: DEFAULT_STATION_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            bill_attempts: DEFAULT_BILL_ATTEMPTS,
        }
    }

    /// Sets the station name.
    pub fn station_name(mut self, name: impl Into<String>) -> Self {
        self.station_name = name.into();
        self
    }

    /// Sets the currency symbol.
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Sets the number of bill number candidates tried per sale.
    pub fn bill_attempts(mut self, attempts: u32) -> Self {
        self.bill_attempts = attempts;
        self
    }

    /// Path of the transaction ledger.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    /// Path of the card balance file.
    pub fn cards_path(&self) -> PathBuf {
        self.data_dir.join(CARDS_FILE)
    }

    /// Path of the credential file.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    /// Directory holding receipts.
    pub fn receipts_dir(&self) -> PathBuf {
        self.data_dir.join(RECEIPTS_DIR)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::open(StoreConfig::new("./pump_data"))?;
/// let balance = store.cards().balance_of("4111111111111111")?;
/// let entries = store.transactions().entries()?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Opens the store, creating the data and receipt directories.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.data_dir.display(), "Opening data directory");

        let receipts = config.receipts_dir();
        fs::create_dir_all(&receipts).map_err(|e| StoreError::io(&receipts, e))?;

        Ok(Store { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Returns the card repository.
    pub fn cards(&self) -> CardRepository {
        CardRepository::new(self.config.cards_path())
    }

    /// Returns the transaction ledger repository.
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.config.ledger_path(), &self.config.currency_symbol)
    }

    /// Returns the receipt repository.
    pub fn receipts(&self) -> ReceiptRepository {
        ReceiptRepository::new(
            self.config.receipts_dir(),
            &self.config.station_name,
            &self.config.currency_symbol,
        )
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.config.users_path())
    }

    /// Allocates an unused bill number using the thread RNG.
    pub fn next_bill_number(&self) -> StoreResult<BillNumber> {
        self.next_bill_number_with(&mut rand::thread_rng())
    }

    /// Allocates an unused bill number from `rng`.
    pub fn next_bill_number_with<R: rand::Rng>(&self, rng: &mut R) -> StoreResult<BillNumber> {
        let in_ledger = self.transactions().bill_numbers()?;
        let receipts = self.receipts();
        bill::allocate(rng, self.config.bill_attempts, |candidate| {
            Ok(receipts.exists(candidate) || in_ledger.contains(&candidate))
        })
    }

    /// Stamps and persists a completed sale.
    ///
    /// Allocates the bill number, takes the local time, and assigns a fresh
    /// reference id before calling [`Store::commit_sale`].
    pub fn record_sale(
        &self,
        fuel_type: &str,
        fill: &Fill,
        settlement: Settlement,
    ) -> StoreResult<Sale> {
        let bill_number = self.next_bill_number()?;
        let sale = Sale::new(
            Uuid::new_v4(),
            bill_number,
            Local::now().naive_local(),
            fuel_type,
            fill,
            settlement,
        );
        self.commit_sale(&sale)?;
        Ok(sale)
    }

    /// Persists a sale: receipt first, then card debit, then ledger line.
    ///
    /// Earlier steps are undone when a later one fails.
    pub fn commit_sale(&self, sale: &Sale) -> StoreResult<PathBuf> {
        let receipts = self.receipts();
        let receipt = receipts.write(sale)?;

        if let Settlement::Card {
            card_number,
            remaining_balance,
            ..
        } = &sale.settlement
        {
            if let Err(err) = self.cards().set_balance(card_number, *remaining_balance) {
                self.discard_receipt(sale);
                return Err(err);
            }
        }

        if let Err(err) = self.transactions().append(sale) {
            warn!(bill_number = %sale.bill_number, error = %err, "Ledger append failed, rolling back");
            self.restore_card(sale);
            self.discard_receipt(sale);
            return Err(err);
        }

        info!(
            bill_number = %sale.bill_number,
            fuel = %sale.fuel_type,
            total = %sale.total,
            method = %sale.payment_method(),
            "Sale committed"
        );
        Ok(receipt)
    }

    fn discard_receipt(&self, sale: &Sale) {
        if let Err(err) = self.receipts().discard(sale.bill_number) {
            error!(bill_number = %sale.bill_number, error = %err, "Could not discard receipt");
        }
    }

    fn restore_card(&self, sale: &Sale) {
        let Settlement::Card {
            card_number,
            deducted,
            remaining_balance,
        } = &sale.settlement
        else {
            return;
        };
        let balance = *remaining_balance + *deducted;
        if let Err(err) = self.cards().set_balance(card_number, balance) {
            error!(
                bill_number = %sale.bill_number,
                balance = %balance,
                error = %err,
                "Could not restore card balance"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
