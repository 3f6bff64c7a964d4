//! # Card Repository
//!
//! Stored-value card balances, one `cardNumber,balance` line per card.
//!
//! ## Update Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       set_balance(card, new)                            │
//! │                                                                         │
//! │  1. READ    card_balances.txt (missing → empty)                        │
//! │  2. REWRITE line for `card`; every other line copied verbatim          │
//! │             (no line for `card` → append one)                          │
//! │  3. WRITE   card_balances.txt.tmp                                      │
//! │  4. RENAME  .tmp → card_balances.txt                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Card numbers on disk are compared after normalization, so
//! `4111-1111 1111` and `411111111111` are the same card.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use pump_core::validation::{normalize_card_number, parse_money};
use pump_core::Money;

const SEPARATOR: char = ',';

/// Repository for card balances.
#[derive(Debug, Clone)]
pub struct CardRepository {
    path: PathBuf,
}

impl CardRepository {
    /// Creates a new CardRepository over the given file.
    pub fn new(path: PathBuf) -> Self {
        CardRepository { path }
    }

    /// Returns the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Current balance of `card`.
    ///
    /// ## Returns
    /// * `Ok(Some(balance))` - card has an entry (possibly zero)
    /// * `Ok(None)` - no entry, or the file does not exist
    /// * `Err(Corrupt)` - the card's entry has an unreadable balance
    pub fn balance_of(&self, card: &str) -> StoreResult<Option<Money>> {
        let contents = self.read()?;

        for (index, line) in contents.lines().enumerate() {
            let Some((number, balance)) = split_line(line) else {
                continue;
            };
            if !same_card(number, card) {
                continue;
            }
            let balance = parse_money("balance", balance).map_err(|e| {
                StoreError::corrupt(&self.path, index + 1, e.to_string())
            })?;
            debug!(card = %card, balance = %balance, "Card balance read");
            return Ok(Some(balance));
        }

        debug!(card = %card, "Card not in ledger");
        Ok(None)
    }

    /// Sets the balance of `card`, replacing its line or appending one.
    pub fn set_balance(&self, card: &str, balance: Money) -> StoreResult<()> {
        let contents = self.read()?;
        let new_line = format_line(card, balance);

        let mut replaced = false;
        let mut lines: Vec<String> = contents
            .lines()
            .map(|line| match split_line(line) {
                Some((number, _)) if same_card(number, card) => {
                    replaced = true;
                    new_line.clone()
                }
                _ => line.to_string(),
            })
            .collect();
        if !replaced {
            lines.push(new_line);
        }

        let mut output = lines.join("\n");
        output.push('\n');

        let tmp = self.path.with_extension("txt.tmp");
        fs::write(&tmp, output).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        info!(card = %card, balance = %balance, appended = !replaced, "Card balance updated");
        Ok(())
    }

    fn read(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

/// Formats one card line.
pub fn format_line(card: &str, balance: Money) -> String {
    format!("{}{}{}", card, SEPARATOR, balance)
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(SEPARATOR)
        .map(|(number, balance)| (number.trim(), balance.trim()))
}

fn same_card(stored: &str, card: &str) -> bool {
    normalize_card_number(stored)
        .map(|stored| stored == card)
        .unwrap_or(false)
}

// =============================================================================
// Unit Tests
// =============================================================================
