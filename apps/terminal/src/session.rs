//! # Session
//!
//! The menu loop. Reads one choice, runs it, reports any error, and redraws
//! the menu until the cashier exits or input runs out.
//!
//! ```text
//! ┌──────────┐   choice   ┌────────────┐  Ok / Err(non-fatal)
//! │  render  │──────────► │  dispatch  │──────────────────────┐
//! └──────────┘            └────────────┘                      │
//!      ▲                        │ Err(Fatal)                  │
//!      │                        ▼                             │
//!      │                  return Err                          │
//!      └──────────── "Returning to main menu..." ◄────────────┘
//! ```

use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::commands::{history, purchase};
use crate::console::Console;
use crate::error::{AppError, AppResult};
use crate::menu::{Menu, MenuChoice};
use pump_core::RateTable;
use pump_store::Store;

/// One interactive session at the pump.
pub struct Session<R, W> {
    console: Console<R, W>,
    store: Store,
    rates: RateTable,
    menu: Menu,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session.
    pub fn new(console: Console<R, W>, store: Store, rates: RateTable, menu: Menu) -> Self {
        Session {
            console,
            store,
            rates,
            menu,
        }
    }

    /// Runs the menu loop until exit.
    ///
    /// Only fatal errors are returned; everything else is printed and the
    /// loop continues.
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            let screen = self
                .menu
                .render(&self.rates, &self.store.config().currency_symbol);
            self.console.line(screen)?;

            let choice = match self.console.prompt("Enter your choice: ")? {
                Some(input) => self.menu.parse(&input),
                None => {
                    debug!("Input closed, ending session");
                    MenuChoice::Exit
                }
            };

            if choice == MenuChoice::Exit {
                self.console.line(format!(
                    "Thank you for visiting {}. Goodbye!",
                    self.store.config().station_name
                ))?;
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(code = ?err.code, message = %err.message, "Menu action failed");
                    self.console.line(&err.message)?;
                }
            }

            self.console.line("\nReturning to main menu...\n")?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> AppResult<()> {
        match choice {
            MenuChoice::Fuel(fuel) => {
                purchase::purchase(&mut self.console, &self.store, &self.rates, &fuel).map(|_| ())
            }
            MenuChoice::History => history::show_history(&mut self.console, &self.store),
            MenuChoice::Summary => history::show_summary(&mut self.console, &self.store),
            MenuChoice::DeleteHistory => history::delete_history(&mut self.console, &self.store),
            MenuChoice::Invalid(input) => {
                debug!(input = %input, "Unknown menu choice");
                Err(AppError::input("Invalid option. Please try again."))
            }
            MenuChoice::Exit => Ok(()),
        }
    }
}
