//! # History Commands
//!
//! Transaction history table, sales summary, and ledger deletion.

use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::console::{Console, SCREEN_WIDTH};
use crate::error::AppResult;
use pump_core::ledger::{LedgerEntry, FIELD_COUNT, FIELD_SEPARATOR};
use pump_core::report::{FuelTotals, SalesSummary};
use pump_store::Store;

/// Printed when the ledger is missing or holds no readable line.
pub const NO_HISTORY: &str = "No transaction history found.";

const HISTORY_HEADERS: [&str; FIELD_COUNT] = [
    "Bill No",
    "Date & Time",
    "Fuel Type",
    "Quantity",
    "Amount",
    "Payment",
];

const SUMMARY_HEADERS: [&str; 4] = ["Fuel Type", "Sales", "Total Liters", "Total Sales"];

// =============================================================================
// Table Rendering
// =============================================================================

/// Lays out rows under headers, each column as wide as its widest cell.
fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> Vec<String> {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR)
            .trim_end()
            .to_string()
    };

    let total_width =
        widths.iter().sum::<usize>() + FIELD_SEPARATOR.len() * N.saturating_sub(1);

    let mut lines = vec![format_row(headers.to_vec()), "-".repeat(total_width)];
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Renders the transaction history table, `None` when there is nothing to show.
pub fn render_history(entries: &[LedgerEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let rows: Vec<[String; FIELD_COUNT]> = entries
        .iter()
        .map(|entry| entry.cells().map(str::to_string))
        .collect();
    Some(render_table(HISTORY_HEADERS, &rows).join("\n"))
}

fn summary_row(fuel: &str, totals: &FuelTotals, symbol: &str) -> [String; 4] {
    [
        fuel.to_string(),
        totals.sales.to_string(),
        format!("{} L", totals.litres),
        totals.amount.with_symbol(symbol),
    ]
}

/// Renders the per-fuel summary with a grand total, `None` when empty.
pub fn render_summary(summary: &SalesSummary, symbol: &str) -> Option<String> {
    if summary.is_empty() {
        return None;
    }

    let mut rows: Vec<[String; 4]> = summary
        .fuels()
        .map(|(fuel, totals)| summary_row(fuel, totals, symbol))
        .collect();
    rows.push(summary_row("TOTAL", &summary.grand_total(), symbol));

    let mut lines = render_table(SUMMARY_HEADERS, &rows);
    let rule = lines[1].clone();
    lines.insert(lines.len() - 1, rule);
    Some(lines.join("\n"))
}

// =============================================================================
// Commands
// =============================================================================

/// Prints the transaction history.
pub fn show_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
) -> AppResult<()> {
    let entries = store.transactions().entries()?;
    debug!(count = entries.len(), "Loaded ledger entries");

    let Some(table) = render_history(&entries) else {
        return console.line(NO_HISTORY);
    };

    console.line("")?;
    console.rule('-')?;
    console.line(format!("{:-^width$}", "Transaction History", width = SCREEN_WIDTH))?;
    console.rule('-')?;
    console.line(table)?;
    console.rule('-')?;
    Ok(())
}

/// Prints the sales summary.
pub fn show_summary<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
) -> AppResult<()> {
    let entries = store.transactions().entries()?;
    let summary = SalesSummary::from_entries(&entries);
    if summary.skipped() > 0 {
        debug!(skipped = summary.skipped(), "Skipped unreadable ledger lines in summary");
    }

    let Some(table) = render_summary(&summary, &store.config().currency_symbol) else {
        return console.line(NO_HISTORY);
    };

    console.line("")?;
    console.rule('-')?;
    console.line(format!("{:-^width$}", "Sales Summary", width = SCREEN_WIDTH))?;
    console.rule('-')?;
    console.line(table)?;
    console.rule('-')?;
    Ok(())
}

/// Deletes the ledger file. Receipts and card balances are kept.
pub fn delete_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
) -> AppResult<()> {
    if store.transactions().delete()? {
        info!("Transaction history deleted");
        console.line("Transaction history deleted successfully.")
    } else {
        console.line("No transaction history file to delete.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pump_core::ledger::parse_line;

    fn entries() -> Vec<LedgerEntry> {
        [
            "482913 | 2026-10-18 09:41:07 | Diesel | 10.000 L | ₱683.00 | Cash",
            "100001 | 2026-10-18 10:02:55 | Unleaded Gasoline | 2.069 L | ₱150.00 | Card",
            "100002 | 2026-10-18 10:15:00 | Diesel | 2.500 L | ₱170.75 | Cash",
        ]
        .iter()
        .filter_map(|line| parse_line(line))
        .collect()
    }

    #[test]
    fn test_history_empty() {
        assert_eq!(render_history(&[]), None);
    }

    #[test]
    fn test_history_columns_align() {
        let table = render_history(&entries()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(&format!(
            "Bill No | {:<19} | {:<17} |",
            "Date & Time", "Fuel Type"
        )));
        assert!(lines[1].chars().all(|c| c == '-'));

        // The payment column starts at the same offset on every row.
        let offsets: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, line)| line[..line.rfind(" | ").unwrap()].chars().count())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_summary_with_total() {
        let summary = SalesSummary::from_entries(&entries());
        let table = render_summary(&summary, "₱").unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Fuel Type"));
        assert!(lines[2].starts_with("Diesel"));
        assert!(lines[2].contains("12.500 L"));
        assert!(lines[2].contains("₱853.75"));
        assert!(lines[3].starts_with("Unleaded Gasoline"));
        assert!(lines[4].chars().all(|c| c == '-'));
        assert!(lines[5].starts_with("TOTAL"));
        assert!(lines[5].contains("₱1003.75"));
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(render_summary(&SalesSummary::new(), "₱"), None);
    }
}
