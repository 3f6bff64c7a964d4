//! # Seed Data Generator
//!
//! Populates a data directory with demo cards and a demo cashier.
//!
//! ## Usage
//! ```bash
//! # Seed ./pump_data (default)
//! cargo run -p pump-store --bin seed
//!
//! # Specify data directory
//! cargo run -p pump-store --bin seed -- --data-dir /var/lib/petrol-pump
//! ```
//!
//! ## Generated Files
//! - `card_balances.txt`: a funded card, a large card, and an empty card
//! - `users.txt`: `admin` / `admin123`
//!
//! Files that already exist are left alone.

use pump_core::Money;
use pump_store::{Store, StoreConfig};
use std::env;

/// Demo cards: (number, balance in centavos).
const DEMO_CARDS: &[(&str, i64)] = &[
    ("4111111111111111", 50_000),
    ("5500000000000004", 250_000),
    ("6011000000000004", 0),
];

/// Demo cashier login.
const DEMO_USER: (&str, &str) = ("admin", "admin123");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir = String::from("./pump_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Petrol Pump Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <PATH>  Data directory (default: ./pump_data)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Petrol Pump Seed Data Generator");
    println!("===============================");
    println!("Data directory: {}", data_dir);
    println!();

    let store = Store::open(StoreConfig::new(&data_dir))?;
    println!("✓ Data directory ready");

    // Cards
    let cards = store.cards();
    if cards.path().exists() {
        println!("⚠ {} already exists, skipping cards", cards.path().display());
    } else {
        for (number, cents) in DEMO_CARDS {
            cards.set_balance(number, Money::from_cents(*cents))?;
            println!("  Card {} → {}", number, Money::from_cents(*cents));
        }
        println!("✓ Wrote {} demo cards", DEMO_CARDS.len());
    }

    // Users
    let users = store.users();
    if users.exists() {
        println!("⚠ {} already exists, skipping users", users.path().display());
    } else {
        let (username, password) = DEMO_USER;
        users.add(username, password)?;
        println!("✓ Added user '{}' (password '{}')", username, password);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
