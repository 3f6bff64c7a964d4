//! # Transaction Repository
//!
//! The append-only transaction ledger, one pipe-delimited line per sale.
//! Line encoding lives in [`pump_core::ledger`].

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use pump_core::ledger::{self, LedgerEntry};
use pump_core::{BillNumber, Sale};

/// Repository for the transaction ledger.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    path: PathBuf,
    currency_symbol: String,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository over the given file.
    pub fn new(path: PathBuf, currency_symbol: impl Into<String>) -> Self {
        TransactionRepository {
            path,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Appends one sale.
    pub fn append(&self, sale: &Sale) -> StoreResult<()> {
        let line = ledger::format_line(sale, &self.currency_symbol);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(file, "{}", line).map_err(|e| StoreError::io(&self.path, e))?;

        info!(bill_number = %sale.bill_number, "Ledger line appended");
        Ok(())
    }

    /// Reads every well-formed entry in file order.
    ///
    /// A missing file reads as empty. Lines with fewer than six fields are
    /// skipped.
    pub fn entries(&self) -> StoreResult<Vec<LedgerEntry>> {
        let contents = self.read()?;

        let mut entries = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ledger::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = index + 1, "Skipping malformed ledger line"),
            }
        }

        debug!(count = entries.len(), "Ledger entries read");
        Ok(entries)
    }

    /// Bill numbers already recorded.
    ///
    /// Lines whose first field is not a six-digit number cannot collide with
    /// a new bill and are left out.
    pub fn bill_numbers(&self) -> StoreResult<HashSet<BillNumber>> {
        let contents = self.read()?;
        Ok(contents
            .lines()
            .filter_map(|line| line.split('|').next())
            .filter_map(|bill| bill.parse().ok())
            .collect())
    }

    /// Deletes the ledger file.
    ///
    /// ## Returns
    /// * `Ok(true)` - file removed
    /// * `Ok(false)` - there was no file
    pub fn delete(&self) -> StoreResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Transaction history deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn read(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::cash_sale;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> TransactionRepository {
        TransactionRepository::new(dir.path().join("fuel_transactions.txt"), "₱")
    }

    #[test]
    fn test_missing_ledger_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        assert!(repo.entries().unwrap().is_empty());
        assert!(repo.bill_numbers().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        repo.append(&cash_sale(482_913)).unwrap();
        repo.append(&cash_sale(100_001)).unwrap();

        let entries = repo.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bill_number, "482913");
        assert_eq!(entries[0].amount, "₱683.00");
        assert_eq!(entries[1].bill_number, "100001");

        let bills = repo.bill_numbers().unwrap();
        assert!(bills.contains(&BillNumber::new(482_913).unwrap()));
        assert!(!bills.contains(&BillNumber::new(555_555).unwrap()));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        fs::write(
            repo.path(),
            "garbage\n\n100001 | 2026-10-18 09:00:00 | Diesel | 10.000 L | ₱683.00 | Cash\n",
        )
        .unwrap();

        let entries = repo.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].fuel_type, "Diesel");
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        assert!(!repo.delete().unwrap());
        repo.append(&cash_sale(482_913)).unwrap();
        assert!(repo.delete().unwrap());
        assert!(!repo.path().exists());
    }
}
