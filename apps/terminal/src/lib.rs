//! # Petrol Pump Terminal
//!
//! Interactive point-of-sale for a single fuel pump.
//!
//! ## Module Organization
//! ```text
//! pump_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── pump.toml + environment overrides
//! ├── console.rs      ◄─── Prompt/response over any reader/writer
//! ├── menu.rs         ◄─── Menu rendering and choice parsing
//! ├── session.rs      ◄─── Menu loop
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── purchase.rs ◄─── Fuel purchase
//! │   ├── history.rs  ◄─── History, summary, delete
//! │   └── auth.rs     ◄─── Login
//! └── error.rs        ◄─── AppError for commands and startup
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod session;

use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::auth;
use config::PumpConfig;
use console::Console;
use error::AppResult;
use menu::Menu;
use pump_store::Store;
use session::Session;

/// Runs the terminal on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Terminal Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • pump.toml, then PUMP_* environment variables                      │
/// │                                                                         │
/// │  3. Open Data Directory ──────────────────────────────────────────────► │
/// │     • Creates <data_dir>/receipts                                       │
/// │                                                                         │
/// │  4. Login (when auth.require_login) ──────────────────────────────────► │
/// │                                                                         │
/// │  5. Menu Loop ────────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting petrol pump terminal");

    let config = PumpConfig::load(None)?;
    info!(
        station = %config.station.name,
        data_dir = %config.data_dir().display(),
        require_login = config.auth.require_login,
        "Configuration loaded"
    );

    let console = Console::new(io::stdin().lock(), io::stdout());
    serve(&config, console)
}

/// Opens the store, logs in if required, and runs the menu loop on `console`.
pub fn serve<R: BufRead, W: Write>(config: &PumpConfig, mut console: Console<R, W>) -> AppResult<()> {
    let rates = config.rate_table()?;
    let menu = Menu::new(&config.station.name, config.menu_entries()?);
    let store = Store::open(config.store_config())?;

    if config.auth.require_login {
        let user = auth::login(&mut console, &store, config.auth.max_attempts)?;
        info!(user = %user, "Cashier logged in");
    }

    Session::new(console, store, rates, menu).run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pump_store=info` - Show sale commits and balance changes
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
