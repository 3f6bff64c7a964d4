//! # Receipt Repository
//!
//! One text receipt per sale at `receipts/bill_<billNo>.txt`.
//!
//! ## Layout
//! ```text
//! --------------------------------------------------
//!                   HP Petrol Pump
//! --------------------------------------------------
//! Bill No: 482913
//! Date & Time: 2026-10-18 09:41:07
//! Reference: 6f1c...
//! Fuel Type: Diesel
//! Quantity: 10.000 Liters
//! Rate per Liter: ₱68.30
//! --------------------------------------------------
//! Total Amount Due: ₱683.00
//! Payment Method: Cash
//! Cash Paid: ₱700.00
//! Change Due: ₱17.00
//! --------------------------------------------------
//! Thank you for your purchase! Visit again.
//! --------------------------------------------------
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use pump_core::{BillNumber, Sale, Settlement};

/// Receipt width in columns.
pub const RECEIPT_WIDTH: usize = 50;

/// Closing line printed on every receipt.
pub const FOOTER: &str = "Thank you for your purchase! Visit again.";

/// Repository for receipt files.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    dir: PathBuf,
    station_name: String,
    currency_symbol: String,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository writing into `dir`.
    pub fn new(
        dir: PathBuf,
        station_name: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        ReceiptRepository {
            dir,
            station_name: station_name.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Path of the receipt for `bill`.
    pub fn path_for(&self, bill: BillNumber) -> PathBuf {
        self.dir.join(format!("bill_{}.txt", bill))
    }

    /// Checks if a receipt for `bill` exists.
    pub fn exists(&self, bill: BillNumber) -> bool {
        self.path_for(bill).exists()
    }

    /// Renders the receipt text for `sale`.
    pub fn render(&self, sale: &Sale) -> String {
        render_receipt(sale, &self.station_name, &self.currency_symbol)
    }

    /// Writes the receipt for `sale`.
    ///
    /// Never overwrites: an existing receipt for the same bill number is an
    /// error.
    pub fn write(&self, sale: &Sale) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.path_for(sale.bill_number);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        file.write_all(self.render(sale).as_bytes())
            .map_err(|e| StoreError::io(&path, e))?;

        info!(bill_number = %sale.bill_number, path = %path.display(), "Receipt written");
        Ok(path)
    }

    /// Removes the receipt for `bill`, used when the rest of a sale fails.
    pub fn discard(&self, bill: BillNumber) -> StoreResult<()> {
        let path = self.path_for(bill);
        fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        info!(bill_number = %bill, "Receipt discarded");
        Ok(())
    }
}

/// Renders a receipt.
pub fn render_receipt(sale: &Sale, station_name: &str, symbol: &str) -> String {
    let rule = "-".repeat(RECEIPT_WIDTH);
    let header = format!("{:^width$}", station_name, width = RECEIPT_WIDTH);

    let mut lines = vec![
        rule.clone(),
        header.trim_end().to_string(),
        rule.clone(),
        format!("Bill No: {}", sale.bill_number),
        format!("Date & Time: {}", sale.timestamp_text()),
        format!("Reference: {}", sale.id),
        format!("Fuel Type: {}", sale.fuel_type),
        format!("Quantity: {} Liters", sale.quantity),
        format!("Rate per Liter: {}", sale.rate.with_symbol(symbol)),
        rule.clone(),
        format!("Total Amount Due: {}", sale.total.with_symbol(symbol)),
        format!("Payment Method: {}", sale.payment_method()),
    ];

    match &sale.settlement {
        Settlement::Cash { tendered, change } => {
            lines.push(format!("Cash Paid: {}", tendered.with_symbol(symbol)));
            lines.push(format!("Change Due: {}", change.with_symbol(symbol)));
        }
        Settlement::Card {
            card_number,
            deducted,
            remaining_balance,
        } => {
            lines.push(format!("Card Number: {}", mask_card(card_number)));
            lines.push(format!("Amount Deducted: {}", deducted.with_symbol(symbol)));
            lines.push(format!(
                "Remaining Balance: {}",
                remaining_balance.with_symbol(symbol)
            ));
        }
    }

    lines.push(rule.clone());
    lines.push(FOOTER.to_string());
    lines.push(rule);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Shows only the last four digits.
fn mask_card(card: &str) -> String {
    let visible = card.len().saturating_sub(4);
    format!("{}{}", "*".repeat(visible), &card[visible..])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{card_sale, cash_sale};
    use tempfile::TempDir;

    #[test]
    fn test_cash_receipt() {
        let text = render_receipt(&cash_sale(482_913), "HP Petrol Pump", "₱");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "-".repeat(RECEIPT_WIDTH));
        assert_eq!(lines[1].trim(), "HP Petrol Pump");
        assert!(lines.contains(&"Bill No: 482913"));
        assert!(lines.contains(&"Date & Time: 2026-10-18 09:41:07"));
        assert!(lines.contains(&"Quantity: 10.000 Liters"));
        assert!(lines.contains(&"Rate per Liter: ₱68.30"));
        assert!(lines.contains(&"Total Amount Due: ₱683.00"));
        assert!(lines.contains(&"Payment Method: Cash"));
        assert!(lines.contains(&"Cash Paid: ₱700.00"));
        assert!(lines.contains(&"Change Due: ₱17.00"));
        assert_eq!(lines[lines.len() - 2], FOOTER);
    }

    #[test]
    fn test_card_receipt() {
        let text = render_receipt(&card_sale(100_001), "HP Petrol Pump", "₱");
        assert!(text.contains("Payment Method: Card"));
        assert!(text.contains("Card Number: ************1111"));
        assert!(text.contains("Amount Deducted: ₱150.00"));
        assert!(text.contains("Remaining Balance: ₱350.00"));
        assert!(!text.contains("Change Due"));
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let repo = ReceiptRepository::new(dir.path().join("receipts"), "HP Petrol Pump", "₱");
        let sale = cash_sale(482_913);

        let path = repo.write(&sale).unwrap();
        assert!(path.ends_with("bill_482913.txt"));
        assert!(repo.exists(sale.bill_number));
        assert!(repo.write(&sale).is_err());
    }

    #[test]
    fn test_mask_short_card() {
        assert_eq!(mask_card("12"), "12");
        assert_eq!(mask_card("12345"), "*2345");
    }
}
