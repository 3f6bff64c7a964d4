//! # Petrol Pump Terminal Entry Point
//!
//! ## Exit Codes
//! - `0`  - cashier exited from the menu
//! - `1`  - fatal error (missing credential file, failed login)
//! - `74` - data directory could not be opened
//! - `78` - invalid configuration

fn main() {
    // The actual setup is in lib.rs so tests can drive the session
    if let Err(err) = pump_terminal::run() {
        eprintln!("{}", err);
        std::process::exit(err.code.exit_code());
    }
}
