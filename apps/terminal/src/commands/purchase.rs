//! # Purchase Command
//!
//! ```text
//! SelectFuel ─► SelectFillMode ─┬─► AmountEntry ───┐
//!                               └─► QuantityEntry ─┤
//!                                                  ▼
//!                               SelectPayment ─┬─► CashEntry ─┐
//!                                              └─► CardEntry ─┤
//!                                                             ▼
//!                                                Commit ─► Confirmation
//! ```
//!
//! Every rejection returns an [`AppError`] before anything is written.

use std::io::{BufRead, Write};
use tracing::debug;

use crate::console::Console;
use crate::error::{AppError, AppResult};
use pump_core::billing::{price_fill, settle_card, settle_cash, Fill, FillRequest};
use pump_core::validation::{normalize_card_number, parse_litres, parse_money};
use pump_core::{CoreError, RateTable, Sale, Settlement};
use pump_store::Store;

/// Runs one purchase of `fuel` and returns the committed sale.
pub fn purchase<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
    rates: &RateTable,
    fuel: &str,
) -> AppResult<Sale> {
    let symbol = store.config().currency_symbol.clone();

    let rate = rates
        .rate_for(fuel)
        .ok_or_else(|| CoreError::RateUnavailable {
            fuel: fuel.to_string(),
        })?;

    console.line("")?;
    console.rule('•')?;
    console.centered(&format!(
        "Current Fuel Rate for {}: {}/Liter",
        fuel,
        rate.with_symbol(&symbol)
    ))?;
    console.rule('•')?;
    console.line("Mode Selection:")?;
    console.line(format!(
        "   1. Fill by Amount (e.g., {}1,000)",
        symbol
    ))?;
    console.line("   2. Fill by Quantity (e.g., 10.0 Liters)")?;
    console.rule('-')?;

    let request = match console.ask("   Enter mode (1 or 2): ")?.as_str() {
        "1" => {
            let input = console.ask(&format!("   Enter amount to fill ({}): ", symbol))?;
            FillRequest::ByAmount(parse_money("amount", &input)?)
        }
        "2" => {
            let input = console.ask("   Enter quantity to fill (Liters): ")?;
            FillRequest::ByQuantity(parse_litres(&input)?)
        }
        _ => return Err(AppError::input("Invalid purchase mode selected.")),
    };

    let fill = price_fill(rate, request)?;
    debug!(fuel, quantity = %fill.quantity, total = %fill.total, "Fill priced");

    console.line("")?;
    console.rule('=')?;
    console.line(format!("TOTAL BILL: {}", fill.total.with_symbol(&symbol)))?;
    console.rule('=')?;
    console.line("Payment Method:")?;
    console.line("   A. Cash")?;
    console.line("   B. Card (Stored Balance)")?;

    let settlement = match console
        .ask("   Enter payment method (A or B): ")?
        .to_uppercase()
        .as_str()
    {
        "A" => {
            let input = console.ask(&format!("   Enter cash amount paid ({}): ", symbol))?;
            settle_cash(fill.total, parse_money("cash paid", &input)?)?
        }
        "B" => {
            let card = normalize_card_number(&console.ask("   Enter card number: ")?)?;
            let balance = store.cards().balance_of(&card)?;
            let settlement = settle_card(&card, fill.total, balance)?;
            console.line("   Card payment processed successfully.")?;
            settlement
        }
        _ => return Err(AppError::input("Invalid payment method selected.")),
    };

    let sale = store.record_sale(fuel, &fill, settlement)?;
    print_confirmation(console, &sale, &fill, &symbol)?;
    Ok(sale)
}

fn print_confirmation<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    sale: &Sale,
    fill: &Fill,
    symbol: &str,
) -> AppResult<()> {
    console.line("")?;
    console.rule('*')?;
    console.centered("TRANSACTION COMPLETE")?;
    console.rule('*')?;
    console.line(format!(" Bill No: {}", sale.bill_number))?;
    console.line(format!(" Date & Time: {}", sale.timestamp_text()))?;
    console.rule('-')?;
    console.line(format!(" Fuel Type: {}", sale.fuel_type))?;
    console.line(format!(" Rate/Liter: {}", fill.rate.with_symbol(symbol)))?;
    console.line(format!(" Quantity:   {} Liters", fill.quantity))?;
    console.rule('-')?;
    console.line(format!(" TOTAL DUE: {}", fill.total.with_symbol(symbol)))?;
    console.line(format!(" Payment: {}", sale.payment_method()))?;

    match &sale.settlement {
        Settlement::Cash { tendered, change } => {
            console.line(format!(" Cash Received: {}", tendered.with_symbol(symbol)))?;
            if change.is_positive() {
                console.line(format!(" CHANGE DUE: {}", change.with_symbol(symbol)))?;
            }
        }
        Settlement::Card {
            deducted,
            remaining_balance,
            ..
        } => {
            console.line(format!(" Amount Deducted: {}", deducted.with_symbol(symbol)))?;
            console.line(format!(
                " Remaining Balance: {}",
                remaining_balance.with_symbol(symbol)
            ))?;
        }
    }

    console.rule('-')?;
    console.centered(" Thank you for your purchase! Visit again. ")?;
    console.rule('*')?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pump_core::Money;
    use pump_store::StoreConfig;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> (Store, RateTable) {
        let store = Store::open(StoreConfig::new(dir.path())).unwrap();
        let mut rates = RateTable::empty();
        rates.insert("Diesel", Money::from_cents(6830)).unwrap();
        rates.insert("Unleaded Gasoline", Money::from_cents(7250)).unwrap();
        (store, rates)
    }

    fn run(store: &Store, rates: &RateTable, fuel: &str, input: &str) -> (AppResult<Sale>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = purchase(&mut console, store, rates, fuel);
        let (_, out) = console.into_parts();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_quantity_cash_purchase() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, out) = run(&store, &rates, "Diesel", "2\n10\nA\n700\n");
        let sale = result.unwrap();

        assert_eq!(sale.total, Money::from_cents(68300));
        assert_eq!(sale.settlement.change_due(), Money::from_cents(1700));
        assert!(out.contains("TOTAL BILL: ₱683.00"));
        assert!(out.contains("CHANGE DUE: ₱17.00"));
        assert!(store.receipts().exists(sale.bill_number));
    }

    #[test]
    fn test_exact_cash_hides_change() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, out) = run(&store, &rates, "Diesel", "2\n10\nA\n₱683\n");
        assert!(result.is_ok());
        assert!(!out.contains("CHANGE DUE"));
    }

    #[test]
    fn test_card_purchase_debits_balance() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);
        store
            .cards()
            .set_balance("4111111111111111", Money::from_cents(50000))
            .unwrap();

        let (result, out) = run(
            &store,
            &rates,
            "Unleaded Gasoline",
            "1\n150\nb\n4111 1111 1111 1111\n",
        );
        result.unwrap();

        assert!(out.contains("Remaining Balance: ₱350.00"));
        assert_eq!(
            store.cards().balance_of("4111111111111111").unwrap(),
            Some(Money::from_cents(35000))
        );
    }

    #[test]
    fn test_amount_below_rate_rejected() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, _) = run(&store, &rates, "Unleaded Gasoline", "1\n50\n");
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::Domain);
        assert!(!store.config().ledger_path().exists());
    }

    #[test]
    fn test_unknown_rate_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, out) = run(&store, &rates, "Kerosene", "2\n10\nA\n700\n");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Error: Could not retrieve fuel rate.");
        assert!(out.is_empty());
        assert!(!store.config().ledger_path().exists());
    }

    #[test]
    fn test_invalid_mode_and_payment() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, _) = run(&store, &rates, "Diesel", "3\n");
        assert_eq!(result.unwrap_err().message, "Invalid purchase mode selected.");

        let (result, _) = run(&store, &rates, "Diesel", "2\n10\nC\n");
        assert_eq!(result.unwrap_err().message, "Invalid payment method selected.");
    }

    #[test]
    fn test_non_numeric_amount_is_input_error() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, _) = run(&store, &rates, "Diesel", "1\nten\n");
        assert_eq!(result.unwrap_err().code, ErrorCode::Input);
    }

    #[test]
    fn test_cash_underpayment_rejected() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, _) = run(&store, &rates, "Diesel", "2\n10\nA\n500\n");
        assert_eq!(result.unwrap_err().code, ErrorCode::Domain);
        assert!(!store.config().ledger_path().exists());
    }

    #[test]
    fn test_unknown_card_rejected() {
        let dir = TempDir::new().unwrap();
        let (store, rates) = setup(&dir);

        let (result, _) = run(&store, &rates, "Diesel", "2\n10\nB\n4000\n");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Card not found: 4000");
    }
}
